//! Outline contours in font units
//!
//! A lightweight mirror of UFO contour data: a closed list of points, each
//! on-curve or off-curve. Conversion to norad lives in `data::conversions`.

use kurbo::{BezPath, Point, Shape, Vec2};

/// Point type, matching the UFO point types used by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Line,
    Curve,
    QCurve,
    OffCurve,
}

impl PointKind {
    pub fn is_on_curve(self) -> bool {
        !matches!(self, PointKind::OffCurve)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub position: Point,
    pub kind: PointKind,
}

impl ContourPoint {
    pub fn new(x: f64, y: f64, kind: PointKind) -> Self {
        Self {
            position: Point::new(x, y),
            kind,
        }
    }
}

/// A closed contour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Self { points }
    }

    /// Polygon through the given corners
    pub fn polygon(corners: impl IntoIterator<Item = Point>) -> Self {
        Self::new(
            corners
                .into_iter()
                .map(|corner| ContourPoint {
                    position: corner,
                    kind: PointKind::Line,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy moved by `delta`, with every coordinate rounded to whole units
    pub fn translated_rounded(&self, delta: Vec2) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|point| ContourPoint {
                    position: (point.position + delta).round(),
                    kind: point.kind,
                })
                .collect(),
        )
    }

    /// Convert to a closed kurbo path
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(start) = self.points.iter().position(|point| point.kind.is_on_curve()) else {
            return path;
        };

        let count = self.points.len();
        path.move_to(self.points[start].position);
        let mut pending: Vec<Point> = Vec::new();
        for step in 1..=count {
            let point = self.points[(start + step) % count];
            match point.kind {
                PointKind::OffCurve => pending.push(point.position),
                PointKind::Line => path.line_to(point.position),
                PointKind::Curve => match pending.as_slice() {
                    [first, second] => path.curve_to(*first, *second, point.position),
                    [only] => path.quad_to(*only, point.position),
                    _ => path.line_to(point.position),
                },
                PointKind::QCurve => {
                    for (index, &control) in pending.iter().enumerate() {
                        // Implied on-curve points sit between consecutive controls
                        let end = match pending.get(index + 1) {
                            Some(&next) => control.midpoint(next),
                            None => point.position,
                        };
                        path.quad_to(control, end);
                    }
                    if pending.is_empty() {
                        path.line_to(point.position);
                    }
                }
            }
            if point.kind.is_on_curve() {
                pending.clear();
            }
        }
        path.close_path();
        path
    }

    /// Signed area; negative for clockwise contours in y-up font space
    pub fn signed_area(&self) -> f64 {
        self.to_bezpath().area()
    }
}
