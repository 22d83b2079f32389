//! Unicode data: combining marks, decomposition overrides and the
//! decomposition resolver

pub mod decomposition;
pub mod marks;
pub mod tables;

pub use decomposition::{DecompositionResolver, DecompositionSource, UnicodeData};
pub use marks::{combining_mark, is_combining_mark, AnchorRole, CombiningMark, COMBINING_MARKS};
