//! Command line interface for the pixfont converter
//!
//! Handles parsing command line arguments and provides validation for user
//! inputs. Every option can also be set in the JSON settings file; values
//! given here take priority.

use clap::Parser;
use std::path::PathBuf;

/// pixfont CLI arguments
///
/// Examples:
///   pixfont font.bdf out/                          # Static font
///   pixfont font.bdf out/ --axes ESIZ,ROND         # Four masters
///   pixfont font.bdf out/ --axes ESIZ,ROND \
///       --instance "DotMatrix:ESIZ=85,ROND=80"     # Named instance
///   pixfont font.bdf out/ --codepoints 0x20-0x7e   # ASCII only
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "pixfont",
    version,
    about = "Convert BDF pixel fonts to UFO sources",
    long_about = "pixfont converts a BDF bitmap font into UFO vector font sources. Accented glyphs are rebuilt from components with mark anchors when their bitmaps allow it, and optional element axes produce the masters and designspace of a variable font."
)]
pub struct CliArgs {
    /// BDF font to convert
    pub input: PathBuf,

    /// Directory receiving the UFOs and designspace
    pub output: PathBuf,

    /// Log more (-v for progress, -vv for debugging)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log nothing and skip the summary
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// JSON settings file (default: <config dir>/pixfont/settings.json)
    #[clap(long = "config")]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[clap(long = "log-file")]
    pub log_file: Option<PathBuf>,

    #[clap(long = "units-per-em", help = "Units per em (default 1024)")]
    pub units_per_em: Option<u32>,

    /// Only convert these codepoints
    ///
    /// Comma-separated codepoints or inclusive ranges, e.g. "0x20-0x7e,0xa0-0xff".
    #[clap(long = "codepoints")]
    pub codepoints: Option<String>,

    #[clap(long = "family-name")]
    pub family_name: Option<String>,

    /// Font version as "major.minor"
    #[clap(long = "font-version")]
    pub font_version: Option<String>,

    /// Weight class (100, 200, ..., 900)
    #[clap(long = "weight")]
    pub weight: Option<u32>,

    /// "Italic", "Oblique", or "" for upright
    #[clap(long = "slope")]
    pub slope: Option<String>,

    /// Width class from 1 (ultra condensed) to 9 (ultra expanded)
    #[clap(long = "width-class")]
    pub width_class: Option<u32>,

    #[clap(long = "copyright")]
    pub copyright: Option<String>,

    #[clap(long = "designer")]
    pub designer: Option<String>,

    #[clap(long = "designer-url")]
    pub designer_url: Option<String>,

    #[clap(long = "manufacturer")]
    pub manufacturer: Option<String>,

    #[clap(long = "manufacturer-url")]
    pub manufacturer_url: Option<String>,

    #[clap(long = "license")]
    pub license: Option<String>,

    #[clap(long = "license-url")]
    pub license_url: Option<String>,

    /// Ascent in pixels
    #[clap(long = "ascent", allow_hyphen_values = true)]
    pub ascent: Option<i32>,

    /// Descent in pixels
    #[clap(long = "descent", allow_hyphen_values = true)]
    pub descent: Option<i32>,

    /// Cap height in pixels
    #[clap(long = "cap-height")]
    pub cap_height: Option<i32>,

    /// x-height in pixels
    #[clap(long = "x-height")]
    pub x_height: Option<i32>,

    #[clap(long = "underline-position", allow_hyphen_values = true)]
    pub underline_position: Option<i32>,

    #[clap(long = "underline-thickness")]
    pub underline_thickness: Option<i32>,

    #[clap(long = "strikeout-position", allow_hyphen_values = true)]
    pub strikeout_position: Option<i32>,

    #[clap(long = "strikeout-thickness")]
    pub strikeout_thickness: Option<i32>,

    /// Variable axes to activate, e.g. "ESIZ,ROND"
    ///
    /// Available axes: ESIZ (element size), ROND (element roundness),
    /// BLED (element bleed), XESP (horizontal element spacing),
    /// EJIT (element jitter).
    #[clap(long = "axes")]
    pub axes: Option<String>,

    /// Named instance, e.g. "DotMatrix:ESIZ=85,ROND=80" (repeatable)
    #[clap(long = "instance")]
    pub instances: Vec<String>,

    /// Shift every glyph by "x,y" pixels
    #[clap(long = "glyph-offset", allow_hyphen_values = true)]
    pub glyph_offset: Option<String>,

    /// Seed for the jitter axis
    #[clap(long = "jitter-seed")]
    pub jitter_seed: Option<u64>,

    /// Write quadratic instead of cubic element curves
    #[clap(long = "quadratic")]
    pub quadratic: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Checks the paths before anything is read or written, providing clear
    /// error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.is_file() {
            return Err(format!(
                "Input font does not exist: {}\nMake sure the path points to a .bdf file.",
                self.input.display()
            ));
        }
        if self.output.is_file() {
            return Err(format!(
                "Output path is a file: {}\nThe output must be a directory.",
                self.output.display()
            ));
        }
        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Settings file does not exist: {}", config.display()));
            }
        }
        Ok(())
    }
}
