//! Glyph repository
//!
//! Owns every [`Glyph`] of one conversion run. Glyphs are ordered by
//! codepoint so that every later pass visits them in a reproducible order.

use super::bdf::BdfFont;
use super::bitmap::PixelOffset;
use super::codepoints::CodepointSubset;
use super::glyph::{sanitize_name, unicode_label, Glyph, NOTDEF_CODEPOINT};
use crate::unicode::marks::COMBINING_MARKS;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Immutable collection of glyphs, indexed by name and by codepoint
#[derive(Debug, Clone, Default)]
pub struct GlyphRepository {
    glyphs: Vec<Glyph>,
    by_name: HashMap<String, usize>,
    by_codepoint: HashMap<u32, usize>,
}

/// Pixel bounding box over all glyphs: `(min, max)` corners
pub type PixelBounds = (PixelOffset, PixelOffset);

impl GlyphRepository {
    /// Build a repository from glyph records.
    ///
    /// Glyphs are sorted by codepoint. When two glyphs share a codepoint the
    /// first one is kept; names must be unique.
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        let mut glyphs = glyphs;
        glyphs.sort_by_key(|glyph| glyph.codepoint);

        let mut repository = Self::default();
        for glyph in glyphs {
            if repository.by_codepoint.contains_key(&glyph.codepoint) {
                warn!(
                    "Skipping glyph '{}': {} is already mapped to '{}'",
                    glyph.name,
                    unicode_label(glyph.codepoint),
                    repository.by_codepoint_name(glyph.codepoint).unwrap_or_default()
                );
                continue;
            }
            if repository.by_name.contains_key(&glyph.name) {
                warn!("Skipping glyph with duplicate name '{}'", glyph.name);
                continue;
            }
            let index = repository.glyphs.len();
            repository.by_name.insert(glyph.name.clone(), index);
            repository.by_codepoint.insert(glyph.codepoint, index);
            repository.glyphs.push(glyph);
        }
        repository
    }

    /// Build the repository for a BDF font, keeping only glyphs in `subset`
    /// (`.notdef` is always kept).
    ///
    /// Combining marks missing from the font borrow the bitmap of their
    /// spacing modifier equivalent.
    pub fn from_bdf(font: &BdfFont, subset: &CodepointSubset) -> Self {
        let mut glyphs = Vec::with_capacity(font.glyphs.len());
        let mut used_names = HashSet::new();

        for source in &font.glyphs {
            let Ok(codepoint) = u32::try_from(source.encoding) else {
                debug!("Skipping unencoded glyph '{}'", source.name);
                continue;
            };
            if codepoint != NOTDEF_CODEPOINT && !subset.contains(codepoint) {
                continue;
            }

            let mut name = if codepoint == NOTDEF_CODEPOINT {
                ".notdef".to_string()
            } else {
                sanitize_name(&source.name)
            };
            while !used_names.insert(name.clone()) {
                name.push('_');
            }

            let (bitmap, crop_origin) = source.bitmap.crop();
            glyphs.push(Glyph::new(
                name,
                codepoint,
                bitmap,
                source.offset + crop_origin,
                source.advance,
            ));
        }

        let mut repository = Self::new(glyphs);
        repository.synthesize_marks(subset);
        repository
    }

    fn synthesize_marks(&mut self, subset: &CodepointSubset) {
        let mut added = Vec::new();
        for mark in COMBINING_MARKS {
            if self.contains_codepoint(mark.codepoint) || !subset.contains(mark.codepoint) {
                continue;
            }
            let Some(modifier) = mark
                .spacing_equivalent
                .and_then(|modifier| self.by_codepoint(modifier))
            else {
                continue;
            };

            let mut name = format!("uni{:04X}", mark.codepoint);
            while self.by_name.contains_key(&name) {
                name.push('_');
            }
            debug!(
                "Adding {} ({}) using the shape of '{}'",
                name, mark.display_name, modifier.name
            );
            added.push(Glyph::new(
                name,
                mark.codepoint,
                modifier.bitmap.clone(),
                modifier.offset,
                modifier.advance,
            ));
        }

        if !added.is_empty() {
            let mut glyphs = std::mem::take(&mut self.glyphs);
            glyphs.extend(added);
            *self = Self::new(glyphs);
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs in ascending codepoint order
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.by_name.get(name).map(|&index| &self.glyphs[index])
    }

    pub fn by_codepoint(&self, codepoint: u32) -> Option<&Glyph> {
        self.by_codepoint
            .get(&codepoint)
            .map(|&index| &self.glyphs[index])
    }

    fn by_codepoint_name(&self, codepoint: u32) -> Option<String> {
        self.by_codepoint(codepoint).map(|glyph| glyph.name.clone())
    }

    pub fn contains_codepoint(&self, codepoint: u32) -> bool {
        self.by_codepoint.contains_key(&codepoint)
    }

    /// Bounding box of all ink-carrying bitmaps on the pixel grid
    pub fn bounds(&self) -> Option<PixelBounds> {
        self.glyphs
            .iter()
            .map(|glyph| {
                let min = glyph.offset;
                let max = glyph.offset + PixelOffset::new(glyph.height(), glyph.width());
                (min, max)
            })
            .reduce(|(min_a, max_a), (min_b, max_b)| {
                (
                    PixelOffset::new(min_a.row.min(min_b.row), min_a.col.min(min_b.col)),
                    PixelOffset::new(max_a.row.max(max_b.row), max_a.col.max(max_b.col)),
                )
            })
    }
}
