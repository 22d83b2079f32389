//! Pixel elements
//!
//! Every ink pixel of a non-composed glyph is drawn as one copy of the
//! element: a rounded rectangle centered on the pixel. The element is
//! computed once per master. Its point structure never depends on the
//! parameters, so the same contour from different masters interpolates.

use super::contour::{Contour, ContourPoint, PointKind};
use std::f64::consts::FRAC_PI_8;

/// Element parameters as factors (axis value / 100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementShape {
    /// Extent of the element relative to a full pixel
    pub size: f64,
    /// Corner radius relative to the half extent
    pub roundness: f64,
    /// How far the element reaches into the horizontal gap between pixels
    pub bleed: f64,
    /// Horizontal pixel pitch relative to the vertical one
    pub spacing: f64,
}

impl Default for ElementShape {
    fn default() -> Self {
        Self {
            size: 1.0,
            roundness: 0.0,
            bleed: 0.0,
            spacing: 1.0,
        }
    }
}

/// Curve flavor of the element's rounded corners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CurveStyle {
    #[default]
    Cubic,
    Quadratic,
}

/// Half extents and corner geometry of an element
#[derive(Debug, Clone, Copy, PartialEq)]
struct Corners {
    max_x: f64,
    max_y: f64,
    min_x: f64,
    min_y: f64,
    radius: f64,
}

impl Corners {
    fn new(shape: &ElementShape, units_per_pixel: f64) -> Self {
        let upp_x = units_per_pixel * shape.spacing;
        let unit = shape.size * units_per_pixel / 2.0;
        let radius = shape.roundness * unit;
        let max_x = unit + shape.bleed * (upp_x - unit);
        let max_y = unit;
        Self {
            max_x,
            max_y,
            min_x: max_x - radius,
            min_y: max_y - radius,
            radius,
        }
    }
}

/// Build the element contour, centered on the origin and clockwise
pub fn element_contour(shape: &ElementShape, units_per_pixel: f64, style: CurveStyle) -> Contour {
    let corners = Corners::new(shape, units_per_pixel);
    match style {
        CurveStyle::Cubic => cubic(&corners),
        CurveStyle::Quadratic => quadratic(&corners),
    }
}

fn cubic(c: &Corners) -> Contour {
    // Handle length of a quarter circle drawn with one cubic segment
    let tangent = c.radius * 4.0 / 3.0 * FRAC_PI_8.tan();
    let tan_x = c.min_x + tangent;
    let tan_y = c.min_y + tangent;
    use PointKind::{Curve, Line, OffCurve};

    Contour::new(vec![
        ContourPoint::new(c.max_x, c.min_y, Curve),
        ContourPoint::new(c.max_x, -c.min_y, Line),
        ContourPoint::new(c.max_x, -tan_y, OffCurve),
        ContourPoint::new(tan_x, -c.max_y, OffCurve),
        ContourPoint::new(c.min_x, -c.max_y, Curve),
        ContourPoint::new(-c.min_x, -c.max_y, Line),
        ContourPoint::new(-tan_x, -c.max_y, OffCurve),
        ContourPoint::new(-c.max_x, -tan_y, OffCurve),
        ContourPoint::new(-c.max_x, -c.min_y, Curve),
        ContourPoint::new(-c.max_x, c.min_y, Line),
        ContourPoint::new(-c.max_x, tan_y, OffCurve),
        ContourPoint::new(-tan_x, c.max_y, OffCurve),
        ContourPoint::new(-c.min_x, c.max_y, Curve),
        ContourPoint::new(c.min_x, c.max_y, Line),
        ContourPoint::new(tan_x, c.max_y, OffCurve),
        ContourPoint::new(c.max_x, tan_y, OffCurve),
    ])
}

/// Each corner is two quadratic segments of 45° with an on-curve point at
/// the middle of the arc.
fn quadratic(c: &Corners) -> Contour {
    let tangent = c.radius * FRAC_PI_8.tan();
    let tan_x = c.min_x + tangent;
    let tan_y = c.min_y + tangent;
    let diagonal = c.radius * std::f64::consts::FRAC_1_SQRT_2;
    let mid_x = c.min_x + diagonal;
    let mid_y = c.min_y + diagonal;
    use PointKind::{Line, OffCurve, QCurve};

    Contour::new(vec![
        ContourPoint::new(c.max_x, c.min_y, QCurve),
        ContourPoint::new(c.max_x, -c.min_y, Line),
        ContourPoint::new(c.max_x, -tan_y, OffCurve),
        ContourPoint::new(mid_x, -mid_y, QCurve),
        ContourPoint::new(tan_x, -c.max_y, OffCurve),
        ContourPoint::new(c.min_x, -c.max_y, QCurve),
        ContourPoint::new(-c.min_x, -c.max_y, Line),
        ContourPoint::new(-tan_x, -c.max_y, OffCurve),
        ContourPoint::new(-mid_x, -mid_y, QCurve),
        ContourPoint::new(-c.max_x, -tan_y, OffCurve),
        ContourPoint::new(-c.max_x, -c.min_y, QCurve),
        ContourPoint::new(-c.max_x, c.min_y, Line),
        ContourPoint::new(-c.max_x, tan_y, OffCurve),
        ContourPoint::new(-mid_x, mid_y, QCurve),
        ContourPoint::new(-tan_x, c.max_y, OffCurve),
        ContourPoint::new(-c.min_x, c.max_y, QCurve),
        ContourPoint::new(c.min_x, c.max_y, Line),
        ContourPoint::new(tan_x, c.max_y, OffCurve),
        ContourPoint::new(mid_x, mid_y, QCurve),
        ContourPoint::new(c.max_x, tan_y, OffCurve),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Shape, Vec2};

    const UPP: f64 = 100.0;

    #[test]
    fn default_element_fills_the_pixel() {
        let contour = element_contour(&ElementShape::default(), UPP, CurveStyle::Cubic);
        assert_eq!(contour.len(), 16);
        let bounds = contour.to_bezpath().bounding_box();
        assert_eq!((bounds.x0, bounds.y0, bounds.x1, bounds.y1), (-50.0, -50.0, 50.0, 50.0));
        assert!((contour.signed_area() + 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn structure_is_independent_of_parameters() {
        let shapes = [
            ElementShape::default(),
            ElementShape {
                size: 0.1,
                roundness: 1.0,
                bleed: 1.0,
                spacing: 2.0,
            },
        ];
        for style in [CurveStyle::Cubic, CurveStyle::Quadratic] {
            let kinds: Vec<Vec<PointKind>> = shapes
                .iter()
                .map(|shape| {
                    element_contour(shape, UPP, style)
                        .points
                        .iter()
                        .map(|point| point.kind)
                        .collect()
                })
                .collect();
            assert_eq!(kinds[0], kinds[1], "{style:?} masters must interpolate");
        }
    }

    #[test]
    fn bleed_widens_horizontally_only() {
        let shape = ElementShape {
            bleed: 1.0,
            spacing: 1.5,
            ..Default::default()
        };
        let bounds = element_contour(&shape, UPP, CurveStyle::Cubic)
            .to_bezpath()
            .bounding_box();
        assert_eq!(bounds.x1, 150.0);
        assert_eq!(bounds.y1, 50.0);
    }

    #[test]
    fn round_element_approximates_a_circle() {
        let shape = ElementShape {
            roundness: 1.0,
            ..Default::default()
        };
        for style in [CurveStyle::Cubic, CurveStyle::Quadratic] {
            let contour = element_contour(&shape, UPP, style).translated_rounded(Vec2::ZERO);
            let area = -contour.signed_area();
            let circle = std::f64::consts::PI * 50.0 * 50.0;
            assert!(
                (area - circle).abs() / circle < 0.01,
                "{style:?} area {area} too far from {circle}"
            );
        }
    }
}
