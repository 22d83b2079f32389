//! Pixel glyph records

use super::bitmap::{Bitmap, PixelOffset};

/// Codepoint reserved for the `.notdef` glyph
pub const NOTDEF_CODEPOINT: u32 = 0;

/// One pixel glyph of the source font
///
/// Glyphs are created once when the source font is loaded and never change
/// afterwards. Later stages refer to them by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Unique glyph name, also used as the UFO glyph name
    pub name: String,
    /// Unicode codepoint, `0` for `.notdef`
    pub codepoint: u32,
    /// Ink, cropped to its bounding box
    pub bitmap: Bitmap,
    /// Grid position of the bitmap's row 0 / column 0 relative to the origin
    pub offset: PixelOffset,
    /// Advance width in pixels
    pub advance: i32,
}

impl Glyph {
    pub fn new(
        name: impl Into<String>,
        codepoint: u32,
        bitmap: Bitmap,
        offset: PixelOffset,
        advance: i32,
    ) -> Self {
        Self {
            name: name.into(),
            codepoint,
            bitmap,
            offset,
            advance,
        }
    }

    pub fn is_notdef(&self) -> bool {
        self.codepoint == NOTDEF_CODEPOINT
    }

    /// Height of the bitmap in pixels
    pub fn height(&self) -> i32 {
        self.bitmap.height() as i32
    }

    /// Width of the bitmap in pixels
    pub fn width(&self) -> i32 {
        self.bitmap.width() as i32
    }
}

/// Format a codepoint the way log messages refer to it
pub fn unicode_label(codepoint: u32) -> String {
    format!("U+{codepoint:04X}")
}

/// Format a sequence of codepoints for log messages
pub fn sequence_label(codepoints: &[u32]) -> String {
    codepoints
        .iter()
        .map(|&codepoint| unicode_label(codepoint))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sanitize a source glyph name into a UFO-friendly one
///
/// Names must start with an alphanumeric character (otherwise `_` is
/// prepended) and may only contain alphanumerics and `.`.
pub fn sanitize_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len() + 1);
    if !raw.chars().next().is_some_and(char::is_alphanumeric) {
        name.push('_');
    }
    name.extend(
        raw.chars()
            .map(|c| if c.is_alphanumeric() || c == '.' { c } else { '_' }),
    );
    name
}
