//! UFO format conversion utilities
//!
//! This module contains conversion logic from the generated glyph geometry
//! to the norad UFO data model. Pure data transformation, no I/O.

use crate::geometry::{AnchorPoint, ComponentRef, Contour, ContourPoint, GlyphGeometry, PointKind};
use anyhow::{Context, Result};

fn norad_name(name: &str) -> Result<norad::Name> {
    norad::Name::new(name).with_context(|| format!("invalid glyph name '{name}'"))
}

impl GlyphGeometry {
    /// Convert to a norad glyph
    pub fn to_norad_glyph(&self) -> Result<norad::Glyph> {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = self.advance;

        if let Some(codepoint) = char::from_u32(self.codepoint).filter(|_| self.codepoint != 0) {
            glyph.codepoints.insert(codepoint);
        }

        glyph.contours = self.contours.iter().map(Contour::to_norad_contour).collect();
        glyph.components = self
            .components
            .iter()
            .map(ComponentRef::to_norad_component)
            .collect::<Result<_>>()?;
        glyph.anchors = self
            .anchors
            .iter()
            .map(AnchorPoint::to_norad_anchor)
            .collect::<Result<_>>()?;
        Ok(glyph)
    }
}

impl Contour {
    pub fn to_norad_contour(&self) -> norad::Contour {
        let points = self.points.iter().map(ContourPoint::to_norad_point).collect();
        norad::Contour::new(points, None)
    }
}

impl ContourPoint {
    pub fn to_norad_point(&self) -> norad::ContourPoint {
        norad::ContourPoint::new(
            self.position.x,
            self.position.y,
            self.kind.to_norad_point_type(),
            false, // smooth
            None,  // name
            None,  // identifier
        )
    }
}

impl PointKind {
    pub fn to_norad_point_type(self) -> norad::PointType {
        match self {
            PointKind::Line => norad::PointType::Line,
            PointKind::Curve => norad::PointType::Curve,
            PointKind::QCurve => norad::PointType::QCurve,
            PointKind::OffCurve => norad::PointType::OffCurve,
        }
    }
}

impl ComponentRef {
    pub fn to_norad_component(&self) -> Result<norad::Component> {
        let transform = norad::AffineTransform {
            x_scale: 1.0,
            xy_scale: 0.0,
            yx_scale: 0.0,
            y_scale: 1.0,
            x_offset: self.offset.x,
            y_offset: self.offset.y,
        };
        Ok(norad::Component::new(norad_name(&self.glyph)?, transform, None))
    }
}

impl AnchorPoint {
    pub fn to_norad_anchor(&self) -> Result<norad::Anchor> {
        Ok(norad::Anchor::new(
            self.position.x,
            self.position.y,
            Some(norad_name(self.role.as_str())?),
            None, // color
            None, // identifier
        ))
    }
}
