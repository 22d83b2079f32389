//! Conversion runner
//!
//! Drives one conversion from BDF to UFO sources: settings, font loading,
//! composition, one UFO per master and the designspace.

use crate::compose::{compose, CompositionSummary};
use crate::core::cli::CliArgs;
use crate::core::config::{ConfigFile, ConversionSettings};
use crate::data::{build_font, feature_text, save_ufo, ufo_file_name, write_designspace};
use crate::font_source::bdf::BdfFont;
use crate::font_source::metrics::FontInfo;
use crate::font_source::repository::GlyphRepository;
use crate::geometry::{BuildParameters, GlyphBuilder};
use crate::logging::{self, Verbosity};
use crate::unicode::decomposition::DecompositionResolver;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// What a conversion wrote
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub font_name: String,
    pub ufos: Vec<PathBuf>,
    pub designspace: Option<PathBuf>,
    pub summary: CompositionSummary,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.font_name, self.summary)?;
        for ufo in &self.ufos {
            writeln!(f, "  {}", ufo.display())?;
        }
        if let Some(designspace) = &self.designspace {
            writeln!(f, "  {}", designspace.display())?;
        }
        Ok(())
    }
}

/// Run the converter with the given CLI arguments
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    cli_args.validate().map_err(anyhow::Error::msg)?;
    let file = ConfigFile::resolve(cli_args.config.as_deref())?;
    let settings = ConversionSettings::resolve(&cli_args, file.as_ref())
        .context("Invalid configuration")?;

    let (dispatch, _guard) = logging::dispatcher(settings.verbosity, settings.log_file.as_deref())?;
    let report = tracing::dispatcher::with_default(&dispatch, || convert(&settings))?;

    if settings.verbosity != Verbosity::Quiet {
        print!("{report}");
    }
    Ok(())
}

/// Convert one font according to resolved settings
pub fn convert(settings: &ConversionSettings) -> Result<ConversionReport> {
    let font = BdfFont::load(&settings.input)
        .with_context(|| format!("Failed to load {}", settings.input.display()))?;
    let repository = GlyphRepository::from_bdf(&font, &settings.codepoints);
    if repository.is_empty() {
        bail!("No glyphs left to convert in {}", settings.input.display());
    }
    let info = FontInfo::from_bdf(&font, &repository, &settings.overrides);
    info!(
        "Converting {} ({} glyphs, {} px)",
        info.font_name(),
        repository.len(),
        info.metrics.pixel_size
    );

    let composition = compose(&repository, &DecompositionResolver::default());
    let groups = composition.anchors.groups(&repository);

    std::fs::create_dir_all(&settings.output)
        .with_context(|| format!("Failed to create {}", settings.output.display()))?;

    let parameters = BuildParameters {
        units_per_pixel: f64::from(info.units_per_pixel()),
        glyph_offset: settings.glyph_offset,
        curve_style: settings.curve_style,
        jitter_seed: settings.jitter_seed,
    };
    let created = Utc::now();
    let plan = &settings.plan;

    let mut ufos = Vec::with_capacity(plan.masters.len());
    for master in &plan.masters {
        let location = plan.is_variable().then_some(&master.location);
        let builder = GlyphBuilder::new(&repository, &composition, &parameters, location);
        let glyphs = builder.build_all();
        let features = feature_text(&repository, &groups, builder.grid());

        let style_name = info.style_name_with(&master.name);
        let ufo = build_font(&info, &style_name, &glyphs, features, created)?;
        let path = settings.output.join(ufo_file_name(&info, &master.name));
        save_ufo(&ufo, &path)?;
        info!("Wrote {}", path.display());
        ufos.push(path);
    }

    let designspace = if plan.is_variable() {
        let path = write_designspace(&settings.output, &info, plan)?;
        info!("Wrote {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ConversionReport {
        font_name: info.font_name(),
        ufos,
        designspace,
        summary: composition.summary,
    })
}
