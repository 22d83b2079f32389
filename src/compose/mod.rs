//! Glyph composition
//!
//! Decides for every glyph whether it is drawn from its own bitmap or
//! assembled from references to other glyphs, and accumulates the anchors
//! that successful decompositions imply.

pub mod anchors;
pub mod search;

pub use anchors::{AnchorConflict, AnchorGroups, AnchorSynthesizer, GlyphAnchors};
pub use search::{find_components, Placement, SearchOutcome};

use crate::font_source::glyph::{sequence_label, unicode_label};
use crate::font_source::repository::GlyphRepository;
use crate::unicode::decomposition::{DecompositionResolver, DecompositionSource};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// How one glyph will be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphPlan {
    /// Geometry generated from the glyph's own bitmap
    Outline,
    /// References to constituent glyphs
    Components(Vec<Placement>),
}

/// Per-glyph result of the composition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionOutcome {
    /// No decomposition; the search was never run
    Atomic,
    Composed,
    Missing,
    Mismatch,
    Uncomposable,
}

/// Glyph counts by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionSummary {
    pub atomic: usize,
    pub composed: usize,
    pub missing: usize,
    pub mismatch: usize,
    pub uncomposable: usize,
    pub anchor_conflicts: usize,
}

impl CompositionSummary {
    fn record(&mut self, outcome: CompositionOutcome) {
        match outcome {
            CompositionOutcome::Atomic => self.atomic += 1,
            CompositionOutcome::Composed => self.composed += 1,
            CompositionOutcome::Missing => self.missing += 1,
            CompositionOutcome::Mismatch => self.mismatch += 1,
            CompositionOutcome::Uncomposable => self.uncomposable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.atomic + self.composed + self.missing + self.mismatch + self.uncomposable
    }
}

impl fmt::Display for CompositionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} glyphs: {} composed, {} drawn from bitmaps ({} atomic, {} missing parts, {} mismatched, {} uncomposable), {} anchor conflicts",
            self.total(),
            self.composed,
            self.total() - self.composed,
            self.atomic,
            self.missing,
            self.mismatch,
            self.uncomposable,
            self.anchor_conflicts
        )
    }
}

/// Result of composing a whole repository
///
/// Computed once per run and shared read-only by every master build.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    plans: HashMap<String, GlyphPlan>,
    outcomes: HashMap<String, CompositionOutcome>,
    pub anchors: AnchorSynthesizer,
    pub summary: CompositionSummary,
}

impl Composition {
    /// Plan for a glyph; unknown glyphs are drawn from their bitmap
    pub fn plan(&self, glyph: &str) -> &GlyphPlan {
        self.plans.get(glyph).unwrap_or(&GlyphPlan::Outline)
    }

    pub fn outcome(&self, glyph: &str) -> Option<CompositionOutcome> {
        self.outcomes.get(glyph).copied()
    }
}

/// Run decomposition, component search and anchor synthesis over every
/// glyph in ascending codepoint order.
pub fn compose<S: DecompositionSource>(
    repository: &GlyphRepository,
    resolver: &DecompositionResolver<S>,
) -> Composition {
    let mut composition = Composition::default();

    for glyph in repository.iter() {
        let constituents = if glyph.is_notdef() {
            Vec::new()
        } else {
            resolver.resolve(glyph.codepoint)
        };

        let (plan, outcome) = if constituents.is_empty() {
            (GlyphPlan::Outline, CompositionOutcome::Atomic)
        } else {
            match find_components(repository, glyph, &constituents) {
                SearchOutcome::Composed(placements) => {
                    info!(
                        "{} '{}' composed from [{}]",
                        unicode_label(glyph.codepoint),
                        glyph.name,
                        placement_names(&placements)
                    );
                    composition.anchors.add(repository, glyph, &placements);
                    (
                        GlyphPlan::Components(placements),
                        CompositionOutcome::Composed,
                    )
                }
                SearchOutcome::Missing => {
                    info!(
                        "{} '{}': components [{}] not all present, keeping bitmap",
                        unicode_label(glyph.codepoint),
                        glyph.name,
                        sequence_label(&constituents)
                    );
                    (GlyphPlan::Outline, CompositionOutcome::Missing)
                }
                SearchOutcome::Mismatch => {
                    warn!(
                        "{} '{}' does not match components [{}], keeping bitmap",
                        unicode_label(glyph.codepoint),
                        glyph.name,
                        sequence_label(&constituents)
                    );
                    (GlyphPlan::Outline, CompositionOutcome::Mismatch)
                }
                SearchOutcome::Uncomposable => {
                    debug!(
                        "{} '{}' cannot be composed from itself",
                        unicode_label(glyph.codepoint),
                        glyph.name
                    );
                    (GlyphPlan::Outline, CompositionOutcome::Uncomposable)
                }
            }
        };

        composition.summary.record(outcome);
        composition.outcomes.insert(glyph.name.clone(), outcome);
        composition.plans.insert(glyph.name.clone(), plan);
    }

    composition.summary.anchor_conflicts = composition.anchors.conflicts().len();
    composition
}

fn placement_names(placements: &[Placement]) -> String {
    placements
        .iter()
        .map(|placement| placement.glyph.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
