//! Geometric Primitives and Operations
//!
//! Everything that turns pixels into font-unit outlines.

pub mod builder;
pub mod contour;
pub mod element;
pub mod jitter;
pub mod outline;

// Re-export commonly used items
pub use builder::{
    AnchorPoint, BuildParameters, ComponentRef, GlyphBuilder, GlyphGeometry, PixelGrid,
};
pub use contour::{Contour, ContourPoint, PointKind};
pub use element::{element_contour, CurveStyle, ElementShape};
pub use jitter::Jitter;
