//! UFO file I/O operations

use crate::font_source::metrics::FontInfo;
use crate::geometry::GlyphGeometry;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use norad::Font;
use std::path::Path;
use tracing::debug;

/// File name of a UFO: `"Family Style Suffix"` with spaces replaced by dashes
pub fn ufo_file_name(info: &FontInfo, suffix: &str) -> String {
    format!(
        "{} {}.ufo",
        info.family_name,
        info.style_name_with(suffix)
    )
    .replace(' ', "-")
}

/// Assemble a UFO font from generated glyph geometry
pub fn build_font(
    info: &FontInfo,
    style_name: &str,
    glyphs: &[GlyphGeometry],
    features: String,
    created: DateTime<Utc>,
) -> Result<Font> {
    let mut font = Font::new();
    font.font_info = info.to_norad_font_info(style_name, created);
    font.features = features;

    let layer = font.default_layer_mut();
    for geometry in glyphs {
        let glyph = geometry
            .to_norad_glyph()
            .with_context(|| format!("Failed to convert glyph '{}'", geometry.name))?;
        layer.insert_glyph(glyph);
    }
    Ok(font)
}

/// Save a UFO, replacing whatever is at `path`
pub fn save_ufo(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        debug!("Replacing existing {}", path.display());
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    font.save(path)
        .with_context(|| format!("Failed to write UFO {}", path.display()))?;
    Ok(())
}

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let font = Font::load(path)?;
    Ok(font)
}
