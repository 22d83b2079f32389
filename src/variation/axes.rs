//! Variable axis registry

use crate::core::errors::ConfigError;
use crate::geometry::element::ElementShape;
use std::collections::BTreeMap;
use std::fmt;

/// What an axis controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisKind {
    Size,
    Roundness,
    Bleed,
    Spacing,
    Jitter,
}

/// A registered variable axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub kind: AxisKind,
    pub tag: &'static str,
    pub name: &'static str,
    pub minimum: f64,
    pub maximum: f64,
    pub default: f64,
    /// Style name fragment of masters at the minimum
    pub min_label: &'static str,
    /// Style name fragment of masters at the maximum
    pub max_label: &'static str,
}

pub static AXES: [Axis; 5] = [
    Axis {
        kind: AxisKind::Size,
        tag: "ESIZ",
        name: "Element Size",
        minimum: 10.0,
        maximum: 100.0,
        default: 100.0,
        min_label: "Thin",
        max_label: "Thick",
    },
    Axis {
        kind: AxisKind::Roundness,
        tag: "ROND",
        name: "Element Roundness",
        minimum: 0.0,
        maximum: 100.0,
        default: 0.0,
        min_label: "Square",
        max_label: "Round",
    },
    Axis {
        kind: AxisKind::Bleed,
        tag: "BLED",
        name: "Element Bleed",
        minimum: 0.0,
        maximum: 100.0,
        default: 0.0,
        min_label: "NoBleed",
        max_label: "Bleed",
    },
    Axis {
        kind: AxisKind::Spacing,
        tag: "XESP",
        name: "Horizontal Element Spacing",
        minimum: 100.0,
        maximum: 200.0,
        default: 100.0,
        min_label: "Narrow",
        max_label: "Wide",
    },
    Axis {
        kind: AxisKind::Jitter,
        tag: "EJIT",
        name: "Element Jitter",
        minimum: 0.0,
        maximum: 100.0,
        default: 0.0,
        min_label: "Steady",
        max_label: "Jittery",
    },
];

impl AxisKind {
    pub fn axis(self) -> &'static Axis {
        match self {
            AxisKind::Size => &AXES[0],
            AxisKind::Roundness => &AXES[1],
            AxisKind::Bleed => &AXES[2],
            AxisKind::Spacing => &AXES[3],
            AxisKind::Jitter => &AXES[4],
        }
    }
}

impl Axis {
    /// Look up an axis by tag, ignoring case
    pub fn by_tag(tag: &str) -> Option<&'static Axis> {
        AXES.iter().find(|axis| axis.tag.eq_ignore_ascii_case(tag.trim()))
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag, self.name)
    }
}

/// Parse a comma-separated list of axis tags, keeping the given order
pub fn parse_axes(spec: &str) -> Result<Vec<&'static Axis>, ConfigError> {
    let mut axes: Vec<&'static Axis> = Vec::new();
    for tag in spec.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        let axis = Axis::by_tag(tag).ok_or_else(|| ConfigError::UnknownAxis(tag.to_string()))?;
        if axes.iter().any(|active| active.kind == axis.kind) {
            return Err(ConfigError::DuplicateAxis(axis.tag.to_string()));
        }
        axes.push(axis);
    }
    Ok(axes)
}

/// A point in axis space; axes without a value sit at their default
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    values: BTreeMap<AxisKind, f64>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: AxisKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    pub fn set(&mut self, kind: AxisKind, value: f64) {
        self.values.insert(kind, value);
    }

    pub fn get(&self, kind: AxisKind) -> f64 {
        self.values
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.axis().default)
    }

    /// Element parameters at this location
    pub fn element_shape(&self) -> ElementShape {
        ElementShape {
            size: self.get(AxisKind::Size) / 100.0,
            roundness: self.get(AxisKind::Roundness) / 100.0,
            bleed: self.get(AxisKind::Bleed) / 100.0,
            spacing: self.get(AxisKind::Spacing) / 100.0,
        }
    }

    /// Jitter factor at this location
    pub fn jitter(&self) -> f64 {
        self.get(AxisKind::Jitter) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_case_insensitive() {
        let axes = parse_axes("esiz, Rond").unwrap();
        let tags: Vec<_> = axes.iter().map(|axis| axis.tag).collect();
        assert_eq!(tags, vec!["ESIZ", "ROND"]);
    }

    #[test]
    fn unknown_and_duplicate_axes_are_rejected() {
        assert_eq!(parse_axes("ESIZ,WGHT"), Err(ConfigError::UnknownAxis("WGHT".into())));
        assert_eq!(parse_axes("BLED,bled"), Err(ConfigError::DuplicateAxis("BLED".into())));
        assert!(parse_axes("").unwrap().is_empty());
    }

    #[test]
    fn default_location_is_a_full_square_pixel() {
        let location = Location::new();
        assert_eq!(location.element_shape(), ElementShape::default());
        assert_eq!(location.jitter(), 0.0);
    }

    #[test]
    fn location_values_become_factors() {
        let location = Location::new()
            .with(AxisKind::Size, 50.0)
            .with(AxisKind::Spacing, 200.0)
            .with(AxisKind::Jitter, 100.0);
        let shape = location.element_shape();
        assert_eq!(shape.size, 0.5);
        assert_eq!(shape.spacing, 2.0);
        assert_eq!(location.jitter(), 1.0);
    }
}
