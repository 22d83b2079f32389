//! Font metrics and naming
//!
//! This module contains the font-wide information derived from the BDF
//! properties (names, version, style, vertical metrics in pixels) and its
//! conversion to UFO font info in font units.

use super::bdf::BdfFont;
use super::repository::{GlyphRepository, PixelBounds};
use crate::core::errors::ConfigError;
use chrono::{DateTime, Utc};
use norad::fontinfo::{NonNegativeIntegerOrFloat, Os2WidthClass, StyleMapStyle};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_UNITS_PER_EM: u32 = 1024;

const VENDOR_ID: &str = "PXFT";

/// Weight classes and their style names
const WEIGHT_NAMES: [(u32, &str); 9] = [
    (100, "Thin"),
    (200, "ExtraLight"),
    (300, "Light"),
    (400, "Regular"),
    (500, "Medium"),
    (600, "SemiBold"),
    (700, "Bold"),
    (800, "ExtraBold"),
    (900, "Black"),
];

const WIDTH_NAMES: [&str; 9] = [
    "UltraCondensed",
    "ExtraCondensed",
    "Condensed",
    "SemiCondensed",
    "Normal",
    "SemiExpanded",
    "Expanded",
    "ExtraExpanded",
    "UltraExpanded",
];

/// Style slope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Slope {
    #[default]
    Upright,
    Italic,
    Oblique,
}

impl Slope {
    /// Style name fragment, empty when upright
    pub fn name(self) -> &'static str {
        match self {
            Slope::Upright => "",
            Slope::Italic => "Italic",
            Slope::Oblique => "Oblique",
        }
    }

    /// Map a BDF `SLANT` property value
    pub fn from_slant(slant: &str) -> Option<Self> {
        match slant.to_ascii_uppercase().as_str() {
            "R" => Some(Slope::Upright),
            "I" | "RI" => Some(Slope::Italic),
            "O" | "RO" => Some(Slope::Oblique),
            _ => None,
        }
    }
}

impl FromStr for Slope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "upright" | "roman" => Ok(Slope::Upright),
            "italic" => Ok(Slope::Italic),
            "oblique" => Ok(Slope::Oblique),
            _ => Err(ConfigError::InvalidSlope(s.to_string())),
        }
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style name of a weight class, if it is one of the nine standard ones
pub fn weight_name(weight: u32) -> Option<&'static str> {
    WEIGHT_NAMES
        .iter()
        .find(|(class, _)| *class == weight)
        .map(|(_, name)| *name)
}

pub fn validate_weight(weight: u32) -> Result<u32, ConfigError> {
    weight_name(weight)
        .map(|_| weight)
        .ok_or(ConfigError::InvalidWeight(weight))
}

pub fn validate_width_class(width_class: u32) -> Result<u32, ConfigError> {
    if (1..=9).contains(&width_class) {
        Ok(width_class)
    } else {
        Err(ConfigError::InvalidWidthClass(width_class))
    }
}

/// Lowercase and strip everything but letters, e.g. `"Semi Bold"` → `"semibold"`
fn filter_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

fn weight_from_name(name: &str) -> Option<u32> {
    let weight = match filter_name(name).as_str() {
        "thin" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "normal" | "regular" | "book" => 400,
        "medium" => 500,
        "demibold" | "semibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => return None,
    };
    Some(weight)
}

fn width_class_from_name(name: &str) -> Option<u32> {
    let filtered = filter_name(name);
    WIDTH_NAMES
        .iter()
        .position(|width| width.to_ascii_lowercase() == filtered)
        .map(|index| index as u32 + 1)
}

/// User overrides of font data; `None` keeps the value read from the font
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataOverrides {
    pub family_name: Option<String>,
    pub version: Option<String>,
    pub weight: Option<u32>,
    pub slope: Option<Slope>,
    pub width_class: Option<u32>,
    pub copyright: Option<String>,
    pub designer: Option<String>,
    pub designer_url: Option<String>,
    pub manufacturer: Option<String>,
    pub manufacturer_url: Option<String>,
    pub license: Option<String>,
    pub license_url: Option<String>,
    pub ascent: Option<i32>,
    pub descent: Option<i32>,
    pub cap_height: Option<i32>,
    pub x_height: Option<i32>,
    pub underline_position: Option<i32>,
    pub underline_thickness: Option<i32>,
    pub strikeout_position: Option<i32>,
    pub strikeout_thickness: Option<i32>,
    pub units_per_em: Option<u32>,
}

/// Vertical metrics in pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontMetrics {
    pub pixel_size: i32,
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    pub x_height: i32,
    pub underline_position: i32,
    pub underline_thickness: i32,
    pub strikeout_position: i32,
    pub strikeout_thickness: i32,
    pub superscript_size: i32,
    pub superscript_x: i32,
    pub superscript_y: i32,
    pub subscript_size: i32,
    pub subscript_x: i32,
    pub subscript_y: i32,
    /// Ink bounds over all glyphs
    pub bounds: Option<PixelBounds>,
}

/// Font information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontInfo {
    pub family_name: String,
    pub style_name: String,
    pub version: String,
    pub version_major: i32,
    pub version_minor: u32,
    pub weight: u32,
    pub slope: Slope,
    pub width_class: u32,
    pub copyright: String,
    pub designer: String,
    pub designer_url: String,
    pub manufacturer: String,
    pub manufacturer_url: String,
    pub license: String,
    pub license_url: String,
    pub units_per_em: u32,
    pub metrics: FontMetrics,
}

impl FontInfo {
    /// Collect font information from BDF properties, falling back to glyph
    /// measurements, with `overrides` applied on top
    pub fn from_bdf(
        font: &BdfFont,
        repository: &GlyphRepository,
        overrides: &MetadataOverrides,
    ) -> Self {
        let pixel_size = font.pixel_size().max(1);
        let glyph_height = |codepoint: u32| {
            repository
                .by_codepoint(codepoint)
                .filter(|glyph| glyph.bitmap.has_ink())
                .map(|glyph| glyph.height())
        };
        let property = |key: &str| font.property_int(key).map(|value| value as i32);

        let version = overrides
            .version
            .clone()
            .or_else(|| font.property_text("FONT_VERSION"))
            .unwrap_or_default();
        let (version_major, version_minor) = parse_version(&version).unwrap_or((1, 0));

        let family_name = overrides
            .family_name
            .clone()
            .or_else(|| font.property_text("FAMILY_NAME"))
            .unwrap_or_else(|| font.name.clone());
        let weight = overrides.weight.unwrap_or_else(|| {
            font.property_text("WEIGHT_NAME")
                .and_then(|name| weight_from_name(&name))
                .unwrap_or(400)
        });
        let slope = overrides.slope.unwrap_or_else(|| {
            font.property_text("SLANT")
                .and_then(|slant| Slope::from_slant(&slant))
                .unwrap_or_default()
        });
        let width_class = overrides.width_class.unwrap_or_else(|| {
            font.property_text("SETWIDTH_NAME")
                .and_then(|name| width_class_from_name(&name))
                .unwrap_or(5)
        });

        let cap_height = overrides
            .cap_height
            .or_else(|| property("CAP_HEIGHT"))
            .or_else(|| glyph_height(0x58))
            .unwrap_or(pixel_size);
        let x_height = overrides
            .x_height
            .or_else(|| property("X_HEIGHT"))
            .or_else(|| glyph_height(0x78))
            .unwrap_or(pixel_size);
        let script_size = (0.6 * f64::from(cap_height)) as i32;
        let superscript_size = property("SUPERSCRIPT_SIZE").unwrap_or(script_size);
        let subscript_size = property("SUBSCRIPT_SIZE").unwrap_or(script_size);

        let metrics = FontMetrics {
            pixel_size,
            ascent: overrides
                .ascent
                .or_else(|| property("FONT_ASCENT"))
                .unwrap_or(pixel_size),
            descent: overrides
                .descent
                .or_else(|| property("FONT_DESCENT"))
                .unwrap_or(0),
            cap_height,
            x_height,
            underline_position: overrides
                .underline_position
                .or_else(|| property("UNDERLINE_POSITION"))
                .unwrap_or(0),
            underline_thickness: overrides
                .underline_thickness
                .or_else(|| property("UNDERLINE_THICKNESS"))
                .unwrap_or(0),
            strikeout_position: overrides
                .strikeout_position
                .or_else(|| property("STRIKEOUT_ASCENT"))
                .unwrap_or(0),
            strikeout_thickness: overrides
                .strikeout_thickness
                .or_else(|| property("STRIKEOUT_DESCENT"))
                .unwrap_or(0),
            superscript_size,
            superscript_x: property("SUPERSCRIPT_X").unwrap_or(cap_height - superscript_size),
            superscript_y: property("SUPERSCRIPT_Y").unwrap_or(cap_height - superscript_size),
            subscript_size,
            subscript_x: property("SUBSCRIPT_X").unwrap_or(cap_height - subscript_size),
            subscript_y: property("SUBSCRIPT_Y").unwrap_or(cap_height - subscript_size),
            bounds: repository.bounds(),
        };

        let mut info = Self {
            family_name,
            style_name: String::new(),
            version,
            version_major,
            version_minor,
            weight,
            slope,
            width_class,
            copyright: overrides.copyright.clone().unwrap_or_else(|| {
                font.property_text("COPYRIGHT")
                    .unwrap_or_else(|| font.comments.join("\n"))
            }),
            designer: overrides.designer.clone().unwrap_or_default(),
            designer_url: overrides.designer_url.clone().unwrap_or_default(),
            manufacturer: overrides
                .manufacturer
                .clone()
                .or_else(|| font.property_text("FOUNDRY"))
                .unwrap_or_default(),
            manufacturer_url: overrides.manufacturer_url.clone().unwrap_or_default(),
            license: overrides.license.clone().unwrap_or_default(),
            license_url: overrides.license_url.clone().unwrap_or_default(),
            units_per_em: overrides.units_per_em.unwrap_or(DEFAULT_UNITS_PER_EM),
            metrics,
        };
        info.style_name = info.base_style_name();
        info
    }

    /// Weight name, then slope, then width when not normal
    fn base_style_name(&self) -> String {
        let mut parts = vec![weight_name(self.weight).unwrap_or("Regular")];
        if self.slope != Slope::Upright {
            parts.push(self.slope.name());
        }
        if self.width_class != 5 {
            let index = (self.width_class as usize).checked_sub(1);
            if let Some(width) = index.and_then(|index| WIDTH_NAMES.get(index)) {
                parts.push(width);
            }
        }
        parts.join(" ")
    }

    /// Full style name with an optional suffix (master or instance name)
    pub fn style_name_with(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.style_name.clone()
        } else {
            format!("{} {}", self.style_name, suffix)
        }
    }

    /// `"Family Style"`
    pub fn font_name(&self) -> String {
        format!("{} {}", self.family_name, self.style_name)
    }

    /// Font units per pixel row, at least one
    pub fn units_per_pixel(&self) -> i32 {
        (self.units_per_em as i32 / self.metrics.pixel_size.max(1)).max(1)
    }

    pub fn line_ascender(&self) -> i32 {
        self.metrics.ascent * self.units_per_pixel()
    }

    pub fn line_descender(&self) -> i32 {
        -self.metrics.descent * self.units_per_pixel()
    }

    /// Descender of an em box vertically centered on the line
    pub fn em_descender(&self) -> i32 {
        let line_height = self.line_ascender() - self.line_descender();
        // truncating division, like the line gap split of the em box
        self.line_descender() - (self.units_per_em as i32 - line_height) / 2
    }

    pub fn em_ascender(&self) -> i32 {
        self.units_per_em as i32 + self.em_descender()
    }

    pub fn style_map_style(&self) -> StyleMapStyle {
        match (self.weight > 500, self.slope != Slope::Upright) {
            (false, false) => StyleMapStyle::Regular,
            (false, true) => StyleMapStyle::Italic,
            (true, false) => StyleMapStyle::Bold,
            (true, true) => StyleMapStyle::BoldItalic,
        }
    }

    fn width_class_enum(&self) -> Os2WidthClass {
        match self.width_class {
            1 => Os2WidthClass::UltraCondensed,
            2 => Os2WidthClass::ExtraCondensed,
            3 => Os2WidthClass::Condensed,
            4 => Os2WidthClass::SemiCondensed,
            6 => Os2WidthClass::SemiExpanded,
            7 => Os2WidthClass::Expanded,
            8 => Os2WidthClass::ExtraExpanded,
            9 => Os2WidthClass::UltraExpanded,
            _ => Os2WidthClass::Normal,
        }
    }

    /// Convert to norad FontInfo for a master whose style name is `style_name`
    pub fn to_norad_font_info(&self, style_name: &str, created: DateTime<Utc>) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();
        let upp = self.units_per_pixel();
        let font_name = format!("{} {}", self.family_name, style_name);
        let to_units = |pixels: i32| pixels * upp;
        let script_size = |pixels: i32| {
            (f64::from(pixels) / f64::from(self.metrics.cap_height.max(1))
                * f64::from(self.units_per_em)) as i32
        };

        info.family_name = Some(self.family_name.clone());
        info.style_name = Some(style_name.to_string());
        info.style_map_family_name = Some(font_name.clone());
        info.style_map_style_name = Some(self.style_map_style());
        info.version_major = Some(self.version_major);
        info.version_minor = Some(self.version_minor);
        if !self.copyright.is_empty() {
            info.copyright = Some(self.copyright.clone());
        }
        info.units_per_em = NonNegativeIntegerOrFloat::new(f64::from(self.units_per_em));
        info.ascender = Some(f64::from(self.em_ascender()));
        info.descender = Some(f64::from(self.em_descender()));
        info.x_height = Some(f64::from(to_units(self.metrics.x_height)));
        info.cap_height = Some(f64::from(to_units(self.metrics.cap_height)));
        info.italic_angle = Some(if self.slope == Slope::Upright { 0.0 } else { -15.0 });

        info.postscript_font_name = Some(font_name.replace(' ', "-"));
        info.postscript_full_name = Some(font_name.clone());
        info.postscript_underline_position =
            Some(f64::from(to_units(self.metrics.underline_position)));
        info.postscript_underline_thickness =
            Some(f64::from(to_units(self.metrics.underline_thickness)));
        info.postscript_weight_name = weight_name(self.weight).map(str::to_string);

        info.open_type_head_created = Some(created.format("%Y/%m/%d %H:%M:%S").to_string());
        info.open_type_hhea_ascender = Some(self.line_ascender());
        info.open_type_hhea_descender = Some(self.line_descender());
        info.open_type_hhea_line_gap = Some(0);

        info.open_type_name_version = Some(format!(
            "Version {}.{}",
            self.version_major, self.version_minor
        ));
        info.open_type_name_unique_id = Some(format!("{}: {}", self.manufacturer, font_name));
        info.open_type_name_compatible_full_name = Some(font_name);
        let optional = |text: &String| (!text.is_empty()).then(|| text.clone());
        info.open_type_name_designer = optional(&self.designer);
        info.open_type_name_designer_url = optional(&self.designer_url);
        info.open_type_name_manufacturer = optional(&self.manufacturer);
        info.open_type_name_manufacturer_url = optional(&self.manufacturer_url);
        info.open_type_name_license = optional(&self.license);
        info.open_type_name_license_url = optional(&self.license_url);

        info.open_type_os2_weight_class = Some(self.weight);
        info.open_type_os2_width_class = Some(self.width_class_enum());
        info.open_type_os2_vendor_id = Some(VENDOR_ID.to_string());
        info.open_type_os2_typo_ascender = Some(self.em_ascender());
        info.open_type_os2_typo_descender = Some(self.em_descender());
        info.open_type_os2_typo_line_gap = Some(0);
        if let Some((min, max)) = self.metrics.bounds {
            info.open_type_os2_win_ascent = Some(to_units(max.row).max(0) as u32);
            info.open_type_os2_win_descent = Some(to_units(-min.row).max(0) as u32);
        }
        info.open_type_os2_subscript_x_size = Some(script_size(self.metrics.subscript_size));
        info.open_type_os2_subscript_y_size = Some(script_size(self.metrics.subscript_size));
        info.open_type_os2_subscript_x_offset = Some(to_units(self.metrics.subscript_x));
        info.open_type_os2_subscript_y_offset = Some(to_units(self.metrics.subscript_y));
        info.open_type_os2_superscript_x_size = Some(script_size(self.metrics.superscript_size));
        info.open_type_os2_superscript_y_size = Some(script_size(self.metrics.superscript_size));
        info.open_type_os2_superscript_x_offset = Some(to_units(self.metrics.superscript_x));
        info.open_type_os2_superscript_y_offset = Some(to_units(self.metrics.superscript_y));
        info.open_type_os2_strikeout_position = Some(to_units(self.metrics.strikeout_position));
        info.open_type_os2_strikeout_size = Some(to_units(self.metrics.strikeout_thickness));
        info
    }
}

/// `"major.minor"`, both parts numeric
fn parse_version(version: &str) -> Option<(i32, u32)> {
    let (major, minor) = version.trim().split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}
