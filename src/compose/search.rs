//! Component search
//!
//! Finds integer pixel offsets for each constituent glyph such that painting
//! all constituents reproduces the composite's bitmap exactly. The search is
//! a depth-first backtracking over every offset at which a constituent's
//! bounding box fits inside the composite's, pruning as soon as a
//! constituent would put ink where the composite has none.

use crate::font_source::bitmap::{Bitmap, PixelOffset};
use crate::font_source::glyph::Glyph;
use crate::font_source::repository::GlyphRepository;
use crate::unicode::marks::combining_mark;

/// One constituent glyph positioned on the font's pixel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub glyph: String,
    /// Absolute grid position of the constituent's bitmap origin
    pub offset: PixelOffset,
}

impl Placement {
    pub fn new(glyph: impl Into<String>, offset: PixelOffset) -> Self {
        Self {
            glyph: glyph.into(),
            offset,
        }
    }
}

/// Result of a component search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Placements in constituent order whose union is the composite bitmap
    Composed(Vec<Placement>),
    /// A constituent (or the spacing substitute of a mark) is not in the font
    Missing,
    /// Every constituent exists but no arrangement reproduces the bitmap
    Mismatch,
    /// A mark would have to be built from the composite itself
    Uncomposable,
}

/// Search for a placement of `constituents` reproducing `composite`
pub fn find_components(
    repository: &GlyphRepository,
    composite: &Glyph,
    constituents: &[u32],
) -> SearchOutcome {
    let canvas = Bitmap::blank_like(&composite.bitmap);
    search(repository, composite, constituents, &canvas)
}

fn search(
    repository: &GlyphRepository,
    composite: &Glyph,
    remaining: &[u32],
    canvas: &Bitmap,
) -> SearchOutcome {
    let Some((&codepoint, rest)) = remaining.split_first() else {
        return if *canvas == composite.bitmap {
            SearchOutcome::Composed(Vec::new())
        } else {
            SearchOutcome::Mismatch
        };
    };

    let mut found = false;

    // Stage 1: the constituent's own glyph
    if let Some(component) = repository.by_codepoint(codepoint) {
        found = true;
        if let Some(outcome) = place(repository, composite, component, rest, canvas) {
            return outcome;
        }
    }

    // Stage 2: a combining mark may be drawn with its spacing equivalent
    if let Some(mark) = combining_mark(codepoint) {
        if let Some(modifier) = mark.spacing_equivalent {
            if modifier == composite.codepoint {
                return SearchOutcome::Uncomposable;
            }
            match repository.by_codepoint(modifier) {
                Some(component) => {
                    found = true;
                    if let Some(outcome) = place(repository, composite, component, rest, canvas)
                    {
                        return outcome;
                    }
                }
                // The substitute is only required when the mark has no glyph
                None if !found => return SearchOutcome::Missing,
                None => {}
            }
        }
    }

    if found {
        SearchOutcome::Mismatch
    } else {
        SearchOutcome::Missing
    }
}

/// Try every offset of `component` in row-major order.
///
/// Returns `None` when no offset leads to a reconstruction, so the caller
/// can move on to its next candidate glyph.
fn place(
    repository: &GlyphRepository,
    composite: &Glyph,
    component: &Glyph,
    rest: &[u32],
    canvas: &Bitmap,
) -> Option<SearchOutcome> {
    let target = &composite.bitmap;
    let stamp = &component.bitmap;
    if stamp.height() > target.height() || stamp.width() > target.width() {
        return None;
    }

    for dy in 0..=(target.height() - stamp.height()) {
        for dx in 0..=(target.width() - stamp.width()) {
            let at = PixelOffset::new(dy as i32, dx as i32);
            let mut painted = canvas.clone();
            if !painted.paint_within(stamp, at, target) {
                continue;
            }

            match search(repository, composite, rest, &painted) {
                SearchOutcome::Composed(mut placements) => {
                    placements.insert(0, Placement::new(&component.name, composite.offset + at));
                    return Some(SearchOutcome::Composed(placements));
                }
                outcome @ (SearchOutcome::Missing | SearchOutcome::Uncomposable) => {
                    return Some(outcome);
                }
                SearchOutcome::Mismatch => {}
            }
        }
    }
    None
}
