//! Font source data structures
//!
//! This module contains everything read from the source bitmap font: the
//! BDF parser, pixel bitmaps, glyph records, the glyph repository and
//! font-wide metrics.

pub mod bdf;
pub mod bitmap;
pub mod codepoints;
pub mod glyph;
pub mod metrics;
pub mod repository;

// Explicit re-exports for public API
pub use bdf::{BdfFont, BdfGlyph, PropertyValue};
pub use bitmap::{Bitmap, PixelOffset};
pub use codepoints::CodepointSubset;
pub use glyph::Glyph;
pub use metrics::{FontInfo, FontMetrics, MetadataOverrides, Slope};
pub use repository::GlyphRepository;
