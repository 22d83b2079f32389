//! pixfont
pub mod compose;
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod logging;
#[cfg(test)]
mod tests;
pub mod unicode;
pub mod variation;
