//! BDF (Glyph Bitmap Distribution Format) reader
//!
//! Reads the subset of BDF 2.1 needed for conversion: font properties,
//! comments and per-glyph bitmaps. Bitmaps are returned uncropped, with rows
//! flipped to bottom-up order (see [`Bitmap`]).

use crate::core::errors::BdfError;
use crate::font_source::bitmap::{Bitmap, PixelOffset};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A property value from the `STARTPROPERTIES` block
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer(i64),
    Text(String),
}

/// One `STARTCHAR` … `ENDCHAR` record
#[derive(Debug, Clone, PartialEq)]
pub struct BdfGlyph {
    pub name: String,
    /// `ENCODING` value; `-1` for unencoded glyphs
    pub encoding: i64,
    /// `DWIDTH` x component in pixels
    pub advance: i32,
    /// Full `BBX` bitmap, bottom row first
    pub bitmap: Bitmap,
    /// `BBX` x/y offset of the bitmap's lower-left corner
    pub offset: PixelOffset,
}

/// A parsed BDF font
#[derive(Debug, Clone, Default)]
pub struct BdfFont {
    pub name: String,
    pub point_size: i32,
    pub comments: Vec<String>,
    pub properties: BTreeMap<String, PropertyValue>,
    pub glyphs: Vec<BdfGlyph>,
}

impl BdfFont {
    /// Load and parse a BDF file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BdfError> {
        let source = std::fs::read(path.as_ref())?;
        // BDF is nominally ASCII, but comments and copyright strings are
        // frequently Latin-1.
        let text = String::from_utf8_lossy(&source);
        Self::parse(&text)
    }

    /// Parse BDF source text
    pub fn parse(source: &str) -> Result<Self, BdfError> {
        let mut font = BdfFont::default();
        let mut default_advance: Option<i32> = None;
        let mut font_box = (0, 0, 0, 0);
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()));

        while let Some((line_no, line)) = lines.next() {
            let (keyword, rest) = split_keyword(line);
            match keyword {
                "COMMENT" => font.comments.push(rest.to_string()),
                "FONT" => font.name = rest.to_string(),
                "SIZE" => font.point_size = parse_ints::<1>(rest, line_no)?[0] as i32,
                "FONTBOUNDINGBOX" => {
                    let [w, h, x, y] = parse_ints::<4>(rest, line_no)?;
                    font_box = (w as i32, h as i32, x as i32, y as i32);
                }
                "DWIDTH" => default_advance = Some(parse_ints::<1>(rest, line_no)?[0] as i32),
                "STARTPROPERTIES" => parse_properties(&mut lines, &mut font.properties)?,
                "STARTCHAR" => {
                    let glyph =
                        parse_glyph(rest, &mut lines, default_advance, font_box)?;
                    font.glyphs.push(glyph);
                }
                "ENDFONT" => break,
                _ => {}
            }
        }

        debug!("Parsed BDF font '{}' with {} glyphs", font.name, font.glyphs.len());
        Ok(font)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Integer property, also accepting numeric strings
    pub fn property_int(&self, key: &str) -> Option<i64> {
        match self.properties.get(key)? {
            PropertyValue::Integer(value) => Some(*value),
            PropertyValue::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Text property, also accepting integers
    pub fn property_text(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            PropertyValue::Integer(value) => Some(value.to_string()),
            PropertyValue::Text(text) => Some(text.clone()),
        }
    }

    /// Nominal pixel size: `PIXEL_SIZE` when present, else the `SIZE` point size
    pub fn pixel_size(&self) -> i32 {
        self.property_int("PIXEL_SIZE")
            .map(|size| size as i32)
            .filter(|&size| size > 0)
            .unwrap_or(self.point_size)
    }
}

fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

fn parse_ints<const N: usize>(text: &str, line_no: usize) -> Result<[i64; N], BdfError> {
    let mut values = [0i64; N];
    let mut fields = text.split_whitespace();
    for value in values.iter_mut() {
        let field = fields
            .next()
            .ok_or_else(|| BdfError::syntax(line_no, format!("expected {N} integers")))?;
        *value = field
            .parse()
            .map_err(|_| BdfError::syntax(line_no, format!("'{field}' is not an integer")))?;
    }
    Ok(values)
}

fn parse_properties<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    properties: &mut BTreeMap<String, PropertyValue>,
) -> Result<(), BdfError> {
    for (_, line) in lines.by_ref() {
        let (key, rest) = split_keyword(line);
        if key == "ENDPROPERTIES" {
            return Ok(());
        }
        if key.is_empty() {
            continue;
        }
        properties.insert(key.to_string(), parse_property_value(rest));
    }
    Err(BdfError::UnexpectedEof("STARTPROPERTIES"))
}

fn parse_property_value(text: &str) -> PropertyValue {
    if let Some(quoted) = text.strip_prefix('"') {
        let inner = quoted.strip_suffix('"').unwrap_or(quoted);
        return PropertyValue::Text(inner.replace("\"\"", "\""));
    }
    match text.parse() {
        Ok(value) => PropertyValue::Integer(value),
        Err(_) => PropertyValue::Text(text.to_string()),
    }
}

fn parse_glyph<'a>(
    name: &str,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    default_advance: Option<i32>,
    font_box: (i32, i32, i32, i32),
) -> Result<BdfGlyph, BdfError> {
    let mut encoding = -1;
    let mut advance = default_advance;
    let (mut width, mut height, mut x_offset, mut y_offset) = font_box;
    let mut rows: Vec<(usize, &str)> = Vec::new();
    let mut in_bitmap = false;

    for (line_no, line) in lines.by_ref() {
        if in_bitmap {
            if line == "ENDCHAR" {
                let bitmap = decode_bitmap(name, &rows, width, height, line_no)?;
                return Ok(BdfGlyph {
                    name: name.to_string(),
                    encoding,
                    advance: advance.unwrap_or(width + x_offset.max(0)),
                    bitmap,
                    offset: PixelOffset::new(y_offset, x_offset),
                });
            }
            rows.push((line_no, line));
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        match keyword {
            "ENCODING" => encoding = parse_ints::<1>(rest, line_no)?[0],
            "DWIDTH" => advance = Some(parse_ints::<1>(rest, line_no)?[0] as i32),
            "BBX" => {
                let [w, h, x, y] = parse_ints::<4>(rest, line_no)?;
                (width, height, x_offset, y_offset) = (w as i32, h as i32, x as i32, y as i32);
            }
            "BITMAP" => in_bitmap = true,
            "ENDCHAR" => {
                // Glyph without a BITMAP section: treat as blank
                return Ok(BdfGlyph {
                    name: name.to_string(),
                    encoding,
                    advance: advance.unwrap_or(width.max(0)),
                    bitmap: Bitmap::new(width.max(0) as usize, height.max(0) as usize),
                    offset: PixelOffset::new(y_offset, x_offset),
                });
            }
            _ => {}
        }
    }

    Err(BdfError::UnexpectedEof("STARTCHAR"))
}

fn decode_bitmap(
    glyph: &str,
    rows: &[(usize, &str)],
    width: i32,
    height: i32,
    end_line: usize,
) -> Result<Bitmap, BdfError> {
    let (width, height) = (width.max(0) as usize, height.max(0) as usize);
    if rows.len() != height {
        return Err(BdfError::BitmapRows {
            line: end_line,
            glyph: glyph.to_string(),
            found: rows.len(),
            expected: height,
        });
    }

    let mut bitmap = Bitmap::new(width, height);
    for (top_index, &(line_no, hex)) in rows.iter().enumerate() {
        let bytes = decode_hex(hex).ok_or_else(|| BdfError::BitmapHex {
            line: line_no,
            glyph: glyph.to_string(),
            row: hex.to_string(),
        })?;
        let row = height - 1 - top_index;
        for col in 0..width {
            let Some(byte) = bytes.get(col / 8) else {
                break;
            };
            if byte & (0x80 >> (col % 8)) != 0 {
                bitmap.set(row, col, true);
            }
        }
    }
    Ok(bitmap)
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(&hex[index..index + 2], 16).ok())
        .collect()
}
