//! Error types
//!
//! Library code reports typed errors; the binary wraps them in `anyhow`
//! with context before printing.

use thiserror::Error;

/// Failures while reading a BDF font
#[derive(Debug, Error)]
pub enum BdfError {
    #[error("failed to read BDF font: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: glyph '{glyph}' has {found} bitmap rows, expected {expected}")]
    BitmapRows {
        line: usize,
        glyph: String,
        found: usize,
        expected: usize,
    },

    #[error("line {line}: invalid hex bitmap row '{row}' in glyph '{glyph}'")]
    BitmapHex {
        line: usize,
        glyph: String,
        row: String,
    },

    #[error("unexpected end of file inside {0}")]
    UnexpectedEof(&'static str),
}

impl BdfError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        BdfError::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Invalid user configuration; always fatal and reported before any output
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown axis '{0}' (available axes: ESIZ, ROND, BLED, XESP, EJIT)")]
    UnknownAxis(String),

    #[error("axis '{0}' is listed more than once")]
    DuplicateAxis(String),

    #[error("instance '{0}' requested but no variable axis is active (use --axes)")]
    InstanceWithoutAxes(String),

    #[error("instance '{instance}' sets axis '{axis}', which is not active")]
    InactiveInstanceAxis { instance: String, axis: String },

    #[error("instance '{instance}' sets {axis}={value}, outside of {minimum}..={maximum}")]
    InstanceValueOutOfRange {
        instance: String,
        axis: String,
        value: f64,
        minimum: f64,
        maximum: f64,
    },

    #[error("malformed instance declaration '{0}' (expected \"Name:TAG=value,...\")")]
    MalformedInstance(String),

    #[error("malformed codepoint range '{0}'")]
    MalformedCodepoints(String),

    #[error("malformed glyph offset '{0}' (expected \"x,y\" in pixels)")]
    MalformedGlyphOffset(String),

    #[error("invalid weight {0} (expected one of 100, 200, ..., 900)")]
    InvalidWeight(u32),

    #[error("invalid width class {0} (expected 1 to 9)")]
    InvalidWidthClass(u32),

    #[error("invalid slope '{0}' (expected \"\", \"Italic\" or \"Oblique\")")]
    InvalidSlope(String),

    #[error("units per em must be positive")]
    InvalidUnitsPerEm,
}
