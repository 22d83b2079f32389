//! Output data: UFO sources, feature code and the designspace

pub mod conversions;
pub mod designspace;
pub mod features;
pub mod ufo;

pub use designspace::{designspace_file_name, write_designspace};
pub use features::feature_text;
pub use ufo::{build_font, save_ufo, ufo_file_name};
