//! Resolved conversion settings
//!
//! Merges CLI arguments with the settings file (CLI first) and validates
//! everything up front. Values taken from the font itself are filled in
//! later, when font information is collected.

use super::user_config::ConfigFile;
use crate::core::cli::CliArgs;
use crate::core::errors::ConfigError;
use crate::font_source::codepoints::CodepointSubset;
use crate::font_source::metrics::{validate_weight, validate_width_class, MetadataOverrides, Slope};
use crate::geometry::CurveStyle;
use crate::logging::Verbosity;
use crate::variation::{parse_axes, InstanceSpec, VariationPlan};
use kurbo::Vec2;
use std::path::PathBuf;

/// Everything a conversion needs, immutable once resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbosity: Verbosity,
    pub log_file: Option<PathBuf>,
    pub codepoints: CodepointSubset,
    pub overrides: MetadataOverrides,
    pub plan: VariationPlan,
    /// Glyph shift in pixels
    pub glyph_offset: Vec2,
    pub jitter_seed: u64,
    pub curve_style: CurveStyle,
}

impl ConversionSettings {
    pub fn resolve(cli: &CliArgs, file: Option<&ConfigFile>) -> Result<Self, ConfigError> {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);

        macro_rules! pick {
            ($field:ident) => {
                cli.$field.clone().or_else(|| file.$field.clone())
            };
        }

        let verbosity = Verbosity::from_flags(
            cli.quiet || file.quiet.unwrap_or(false),
            if cli.verbose > 0 {
                cli.verbose
            } else {
                file.verbose.unwrap_or(0)
            },
        );

        let codepoints = match pick!(codepoints) {
            Some(spec) => spec.parse()?,
            None => CodepointSubset::all(),
        };

        let units_per_em = match pick!(units_per_em) {
            Some(0) => return Err(ConfigError::InvalidUnitsPerEm),
            other => other,
        };

        let overrides = MetadataOverrides {
            family_name: pick!(family_name),
            version: pick!(font_version),
            weight: pick!(weight).map(validate_weight).transpose()?,
            slope: pick!(slope).map(|slope| slope.parse::<Slope>()).transpose()?,
            width_class: pick!(width_class).map(validate_width_class).transpose()?,
            copyright: pick!(copyright),
            designer: pick!(designer),
            designer_url: pick!(designer_url),
            manufacturer: pick!(manufacturer),
            manufacturer_url: pick!(manufacturer_url),
            license: pick!(license),
            license_url: pick!(license_url),
            ascent: pick!(ascent),
            descent: pick!(descent),
            cap_height: pick!(cap_height),
            x_height: pick!(x_height),
            underline_position: pick!(underline_position),
            underline_thickness: pick!(underline_thickness),
            strikeout_position: pick!(strikeout_position),
            strikeout_thickness: pick!(strikeout_thickness),
            units_per_em,
        };

        let axes = match pick!(axes) {
            Some(spec) => parse_axes(&spec)?,
            None => Vec::new(),
        };
        let declarations = if cli.instances.is_empty() {
            file.instances.clone().unwrap_or_default()
        } else {
            cli.instances.clone()
        };
        let specs = declarations
            .iter()
            .map(|declaration| declaration.parse::<InstanceSpec>())
            .collect::<Result<Vec<_>, _>>()?;
        let plan = VariationPlan::new(axes, &specs)?;

        let glyph_offset = match pick!(glyph_offset) {
            Some(offset) => parse_glyph_offset(&offset)?,
            None => Vec2::ZERO,
        };

        let curve_style = if cli.quadratic || file.quadratic.unwrap_or(false) {
            CurveStyle::Quadratic
        } else {
            CurveStyle::Cubic
        };

        Ok(Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            verbosity,
            log_file: pick!(log_file),
            codepoints,
            overrides,
            plan,
            glyph_offset,
            jitter_seed: pick!(jitter_seed).unwrap_or(0),
            curve_style,
        })
    }
}

/// Parse `"x,y"` in pixels
pub fn parse_glyph_offset(text: &str) -> Result<Vec2, ConfigError> {
    let malformed = || ConfigError::MalformedGlyphOffset(text.to_string());
    let (x, y) = text.split_once(',').ok_or_else(malformed)?;
    let x: f64 = x.trim().parse().map_err(|_| malformed())?;
    let y: f64 = y.trim().parse().map_err(|_| malformed())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(malformed());
    }
    Ok(Vec2::new(x, y))
}
