//! Anchor synthesis
//!
//! When a composite is exactly one base glyph plus one combining mark, the
//! placement found by the component search tells us where the mark sits on
//! the base. That relation is recorded as a pair of anchors (one on the
//! mark, one on the base) so mark positioning can reproduce it for any
//! base/mark combination.
//!
//! Anchor positions are stored in glyph space on the pixel grid, i.e. the
//! same space as [`Glyph::offset`].

use super::search::Placement;
use crate::font_source::bitmap::PixelOffset;
use crate::font_source::glyph::{unicode_label, Glyph};
use crate::font_source::repository::GlyphRepository;
use crate::unicode::marks::{combining_mark, AnchorRole};
use crate::unicode::tables::is_fused_composite;
use std::collections::BTreeMap;
use tracing::warn;

/// Anchors of one glyph, at most one per role
pub type GlyphAnchors = BTreeMap<AnchorRole, PixelOffset>;

/// A base anchor that disagrees with the one recorded earlier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorConflict {
    pub composite: u32,
    pub role: AnchorRole,
    pub base: String,
    pub mark: String,
    pub recorded: PixelOffset,
    pub derived: PixelOffset,
}

/// Accumulates anchors over all composites of a font
///
/// Composites must be fed in a stable order (the repository's codepoint
/// order); on conflicts the first recorded position is kept.
#[derive(Debug, Clone, Default)]
pub struct AnchorSynthesizer {
    anchors: BTreeMap<String, GlyphAnchors>,
    conflicts: Vec<AnchorConflict>,
}

/// Glyphs grouped the way mark attachment rules need them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorGroups {
    /// Mark glyphs sharing one `(role, position)` pair
    pub mark_classes: BTreeMap<(AnchorRole, PixelOffset), Vec<String>>,
    /// Base glyphs sharing an identical set of `(role, position)` pairs
    pub base_classes: BTreeMap<Vec<(AnchorRole, PixelOffset)>, Vec<String>>,
}

impl AnchorGroups {
    pub fn is_empty(&self) -> bool {
        self.mark_classes.is_empty() && self.base_classes.is_empty()
    }
}

impl AnchorSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the anchors implied by one decomposed composite.
    ///
    /// Returns `false` when the composite does not qualify: fused
    /// composites, anything but two placements, or not exactly one mark.
    pub fn add(
        &mut self,
        repository: &GlyphRepository,
        composite: &Glyph,
        placements: &[Placement],
    ) -> bool {
        if is_fused_composite(composite.codepoint) {
            return false;
        }
        let [first, second] = placements else {
            return false;
        };
        let (Some(first_glyph), Some(second_glyph)) =
            (repository.get(&first.glyph), repository.get(&second.glyph))
        else {
            return false;
        };

        let first_mark = combining_mark(first_glyph.codepoint);
        let second_mark = combining_mark(second_glyph.codepoint);
        let (base, base_glyph, mark, mark_glyph, role) = match (first_mark, second_mark) {
            (None, Some(descriptor)) => (first, first_glyph, second, second_glyph, descriptor.role),
            (Some(descriptor), None) => (second, second_glyph, first, first_glyph, descriptor.role),
            _ => return false,
        };

        // Mark side: reuse the attachment point once one exists
        let mark_anchors = self.anchors.entry(mark_glyph.name.clone()).or_default();
        let mark_local = match mark_anchors.get(&role) {
            Some(&recorded) => recorded - mark_glyph.offset,
            None => {
                let local = mark_attachment(mark_glyph, role);
                mark_anchors.insert(role, mark_glyph.offset + local);
                local
            }
        };

        // Base side: the same grid point, expressed in the base glyph's space
        let derived = mark.offset + mark_local - base.offset + base_glyph.offset;
        let base_anchors = self.anchors.entry(base_glyph.name.clone()).or_default();
        match base_anchors.get(&role) {
            None => {
                base_anchors.insert(role, derived);
            }
            Some(&recorded) if recorded != derived => {
                warn!(
                    "{} anchor \"{}\" does not align with anchors from components [{}, {}]",
                    unicode_label(composite.codepoint),
                    role,
                    first.glyph,
                    second.glyph
                );
                self.conflicts.push(AnchorConflict {
                    composite: composite.codepoint,
                    role,
                    base: base_glyph.name.clone(),
                    mark: mark_glyph.name.clone(),
                    recorded,
                    derived,
                });
            }
            Some(_) => {}
        }
        true
    }

    /// Anchors recorded for a glyph
    pub fn anchors(&self, glyph: &str) -> Option<&GlyphAnchors> {
        self.anchors.get(glyph)
    }

    /// Every glyph with anchors, by glyph name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GlyphAnchors)> {
        self.anchors
            .iter()
            .map(|(name, anchors)| (name.as_str(), anchors))
    }

    pub fn conflicts(&self) -> &[AnchorConflict] {
        &self.conflicts
    }

    /// Partition anchored glyphs into mark classes and base classes
    pub fn groups(&self, repository: &GlyphRepository) -> AnchorGroups {
        let mut groups = AnchorGroups::default();
        for (name, anchors) in self.iter() {
            if anchors.is_empty() {
                continue;
            }
            let is_mark = repository
                .get(name)
                .is_some_and(|glyph| combining_mark(glyph.codepoint).is_some());

            if is_mark {
                for (&role, &position) in anchors {
                    groups
                        .mark_classes
                        .entry((role, position))
                        .or_default()
                        .push(name.to_string());
                }
            } else {
                let key = anchors.iter().map(|(&role, &position)| (role, position)).collect();
                groups.base_classes.entry(key).or_default().push(name.to_string());
            }
        }
        groups
    }
}

/// Canonical attachment point of a mark, relative to its bitmap origin:
/// horizontally centered, on the edge facing the base.
fn mark_attachment(mark: &Glyph, role: AnchorRole) -> PixelOffset {
    let row = if role.attaches_at_far_edge() {
        mark.height()
    } else {
        0
    };
    PixelOffset::new(row, mark.width() / 2)
}
