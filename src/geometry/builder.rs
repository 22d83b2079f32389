//! Glyph geometry for one master
//!
//! Turns a glyph's composition plan into font-unit geometry: outlines from
//! the bitmap (one element per ink pixel, or the traced pixel outline for
//! static fonts), component references for composed glyphs, and anchors.

use super::contour::Contour;
use super::element::{element_contour, CurveStyle};
use super::jitter::Jitter;
use super::outline::trace;
use crate::compose::{Composition, GlyphPlan};
use crate::font_source::glyph::Glyph;
use crate::font_source::repository::GlyphRepository;
use crate::unicode::marks::AnchorRole;
use crate::variation::Location;
use kurbo::{Point, Vec2};

/// Mapping from the pixel grid to font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelGrid {
    pub upp_x: f64,
    pub upp_y: f64,
    /// Constant shift of every glyph, in pixels
    pub offset: Vec2,
}

impl PixelGrid {
    pub fn new(units_per_pixel: f64, spacing: f64, offset: Vec2) -> Self {
        Self {
            upp_x: units_per_pixel * spacing,
            upp_y: units_per_pixel,
            offset,
        }
    }

    /// Font-unit position of a grid point given as `(x, y)` in pixels
    pub fn to_units(&self, x: f64, y: f64) -> Point {
        Point::new(
            (x + self.offset.x) * self.upp_x,
            (y + self.offset.y) * self.upp_y,
        )
    }
}

/// Reference to another glyph, shifted in font units
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRef {
    pub glyph: String,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPoint {
    pub role: AnchorRole,
    pub position: Point,
}

/// Everything needed to write one glyph of one master
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphGeometry {
    pub name: String,
    pub codepoint: u32,
    pub advance: f64,
    pub contours: Vec<Contour>,
    pub components: Vec<ComponentRef>,
    pub anchors: Vec<AnchorPoint>,
}

/// Settings shared by every glyph of a build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParameters {
    pub units_per_pixel: f64,
    /// Glyph shift in pixels
    pub glyph_offset: Vec2,
    pub curve_style: CurveStyle,
    pub jitter_seed: u64,
}

#[derive(Debug, Clone)]
enum OutlineMode {
    /// Literal pixel outline
    Traced,
    /// One element per ink pixel
    Elements { element: Contour, jitter: f64 },
}

/// Builds glyph geometry for one master
pub struct GlyphBuilder<'a> {
    repository: &'a GlyphRepository,
    composition: &'a Composition,
    grid: PixelGrid,
    mode: OutlineMode,
    jitter_seed: u64,
}

impl<'a> GlyphBuilder<'a> {
    /// `location` is `None` for static fonts, which use traced outlines
    pub fn new(
        repository: &'a GlyphRepository,
        composition: &'a Composition,
        parameters: &BuildParameters,
        location: Option<&Location>,
    ) -> Self {
        let (grid, mode) = match location {
            None => (
                PixelGrid::new(parameters.units_per_pixel, 1.0, parameters.glyph_offset),
                OutlineMode::Traced,
            ),
            Some(location) => {
                let shape = location.element_shape();
                (
                    PixelGrid::new(
                        parameters.units_per_pixel,
                        shape.spacing,
                        parameters.glyph_offset,
                    ),
                    OutlineMode::Elements {
                        element: element_contour(
                            &shape,
                            parameters.units_per_pixel,
                            parameters.curve_style,
                        ),
                        jitter: location.jitter(),
                    },
                )
            }
        };

        Self {
            repository,
            composition,
            grid,
            mode,
            jitter_seed: parameters.jitter_seed,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Geometry of every glyph, in repository order
    pub fn build_all(&self) -> Vec<GlyphGeometry> {
        self.repository.iter().map(|glyph| self.build(glyph)).collect()
    }

    pub fn build(&self, glyph: &Glyph) -> GlyphGeometry {
        let (contours, components) = match self.composition.plan(&glyph.name) {
            GlyphPlan::Outline => (self.outline(glyph), Vec::new()),
            GlyphPlan::Components(placements) => {
                let components = placements
                    .iter()
                    .filter_map(|placement| {
                        let component = self.repository.get(&placement.glyph)?;
                        let delta = placement.offset - component.offset;
                        Some(ComponentRef {
                            glyph: component.name.clone(),
                            offset: Vec2::new(
                                f64::from(delta.col) * self.grid.upp_x,
                                f64::from(delta.row) * self.grid.upp_y,
                            ),
                        })
                    })
                    .collect();
                (Vec::new(), components)
            }
        };

        let anchors = self
            .composition
            .anchors
            .anchors(&glyph.name)
            .map(|anchors| {
                anchors
                    .iter()
                    .map(|(&role, position)| AnchorPoint {
                        role,
                        position: self
                            .grid
                            .to_units(f64::from(position.col), f64::from(position.row))
                            .round(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        GlyphGeometry {
            name: glyph.name.clone(),
            codepoint: glyph.codepoint,
            advance: (f64::from(glyph.advance) * self.grid.upp_x).round(),
            contours,
            components,
            anchors,
        }
    }

    fn outline(&self, glyph: &Glyph) -> Vec<Contour> {
        let origin_x = f64::from(glyph.offset.col);
        let origin_y = f64::from(glyph.offset.row);

        match &self.mode {
            OutlineMode::Traced => trace(&glyph.bitmap)
                .into_iter()
                .map(|corners| {
                    Contour::polygon(corners.into_iter().map(|(x, y)| {
                        self.grid
                            .to_units(origin_x + f64::from(x), origin_y + f64::from(y))
                            .round()
                    }))
                })
                .collect(),
            OutlineMode::Elements { element, jitter } => {
                let mut jitter = Jitter::new(self.jitter_seed, glyph.codepoint, *jitter);
                glyph
                    .bitmap
                    .ink_pixels()
                    .map(|(row, col)| {
                        let center = self.grid.to_units(
                            origin_x + col as f64 + 0.5,
                            origin_y + row as f64 + 0.5,
                        );
                        let displacement = jitter.next_offset(self.grid.upp_x, self.grid.upp_y);
                        element.translated_rounded(center.to_vec2() + displacement)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::font_source::bitmap::{Bitmap, PixelOffset};
    use crate::unicode::decomposition::DecompositionResolver;
    use crate::variation::AxisKind;

    fn parameters() -> BuildParameters {
        BuildParameters {
            units_per_pixel: 100.0,
            glyph_offset: Vec2::ZERO,
            curve_style: CurveStyle::Cubic,
            jitter_seed: 0,
        }
    }

    fn repository() -> GlyphRepository {
        GlyphRepository::new(vec![
            Glyph::new("A", 0x41, Bitmap::from_art(&["#.", "##"]), PixelOffset::new(1, 1), 4),
            Glyph::new("acutecomb", 0x301, Bitmap::from_art(&["#"]), PixelOffset::new(4, 1), 4),
            Glyph::new(
                "Aacute",
                0xc1,
                Bitmap::from_art(&["#.", "..", "#.", "##"]),
                PixelOffset::new(1, 1),
                4,
            ),
        ])
    }

    #[test]
    fn static_glyph_is_traced() {
        let repository = repository();
        let composition = compose(&repository, &DecompositionResolver::default());
        let builder = GlyphBuilder::new(&repository, &composition, &parameters(), None);
        let geometry = builder.build(repository.get("A").unwrap());
        assert_eq!(geometry.advance, 400.0);
        assert_eq!(geometry.contours.len(), 1);
        let corners: Vec<_> = geometry.contours[0]
            .points
            .iter()
            .map(|point| (point.position.x, point.position.y))
            .collect();
        assert_eq!(
            corners,
            vec![
                (100.0, 100.0),
                (100.0, 300.0),
                (200.0, 300.0),
                (200.0, 200.0),
                (300.0, 200.0),
                (300.0, 100.0)
            ]
        );
    }

    #[test]
    fn composed_glyph_references_components() {
        let repository = repository();
        let composition = compose(&repository, &DecompositionResolver::default());
        let builder = GlyphBuilder::new(&repository, &composition, &parameters(), None);
        let geometry = builder.build(repository.get("Aacute").unwrap());

        assert!(geometry.contours.is_empty());
        assert_eq!(
            geometry.components,
            vec![
                ComponentRef {
                    glyph: "A".into(),
                    offset: Vec2::ZERO
                },
                ComponentRef {
                    glyph: "acutecomb".into(),
                    offset: Vec2::ZERO
                },
            ]
        );
        let a = builder.build(repository.get("A").unwrap());
        assert_eq!(a.anchors.len(), 1);
        assert_eq!(a.anchors[0].position, Point::new(100.0, 400.0));
    }

    #[test]
    fn elements_are_centered_on_pixels() {
        let repository = repository();
        let composition = compose(&repository, &DecompositionResolver::default());
        let location = Location::new().with(AxisKind::Size, 50.0);
        let builder = GlyphBuilder::new(&repository, &composition, &parameters(), Some(&location));
        let geometry = builder.build(repository.get("A").unwrap());

        assert_eq!(geometry.contours.len(), 3);
        let first = &geometry.contours[0];
        // pixel (row 0, col 0) of A sits at grid (1, 1); its center is (150, 150)
        assert_eq!(first.points[0].position, Point::new(175.0, 175.0));
    }

    #[test]
    fn jitter_is_reproducible_and_zero_is_off() {
        let repository = repository();
        let composition = compose(&repository, &DecompositionResolver::default());
        let jittery = Location::new().with(AxisKind::Jitter, 100.0);
        let steady = Location::new().with(AxisKind::Jitter, 0.0);
        let glyph = repository.get("A").unwrap();

        let build = |location: &Location, seed: u64| {
            let parameters = BuildParameters {
                jitter_seed: seed,
                ..parameters()
            };
            GlyphBuilder::new(&repository, &composition, &parameters, Some(location)).build(glyph)
        };

        assert_eq!(build(&jittery, 42), build(&jittery, 42));
        assert_eq!(build(&steady, 42), build(&Location::new(), 7));
    }
}
