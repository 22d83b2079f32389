//! Pixel outline tracing
//!
//! Static fonts draw a glyph as the literal outline of its ink. The tracer
//! works on the corner grid of the bitmap: every ink pixel contributes its
//! four sides as clockwise directed edges, sides shared with another ink
//! pixel cancel out, and the remaining edges are chained into contours.

use crate::font_source::bitmap::Bitmap;
use std::collections::BTreeSet;

/// Corner of the pixel grid as `(x, y)`, y growing upward
pub type GridCorner = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    fn turn_left(self) -> Self {
        self.turn_right().turn_right().turn_right()
    }

    fn step(self, (x, y): GridCorner) -> GridCorner {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }
}

type Edge = (GridCorner, Direction);

/// Trace the ink of `bitmap` into closed polygons of grid corners.
///
/// Outer contours run clockwise, counters counter-clockwise. Pixels that
/// only touch at a corner end up in separate contours. Each contour starts
/// at its smallest corner and contains no collinear points.
pub fn trace(bitmap: &Bitmap) -> Vec<Vec<GridCorner>> {
    let mut edges = boundary_edges(bitmap);
    let mut contours = Vec::new();

    while let Some(&(start, first)) = edges.iter().next() {
        edges.remove(&(start, first));
        let mut path = vec![(start, first)];
        let mut corner = first.step(start);
        let mut heading = first;

        while corner != start {
            // Prefer turning right so corner-touching pixels separate
            let Some(next) = [heading.turn_right(), heading, heading.turn_left()]
                .into_iter()
                .find(|&direction| edges.remove(&(corner, direction)))
            else {
                break;
            };
            path.push((corner, next));
            corner = next.step(corner);
            heading = next;
        }
        contours.push(simplify(&path));
    }

    contours.sort();
    contours
}

fn boundary_edges(bitmap: &Bitmap) -> BTreeSet<Edge> {
    let ink = |row: i32, col: i32| -> bool {
        row >= 0 && col >= 0 && bitmap.get(row as usize, col as usize)
    };

    let mut edges = BTreeSet::new();
    for (row, col) in bitmap.ink_pixels() {
        let (row, col) = (row as i32, col as i32);
        let (x, y) = (col, row);
        if !ink(row, col - 1) {
            edges.insert(((x, y), Direction::Up));
        }
        if !ink(row + 1, col) {
            edges.insert(((x, y + 1), Direction::Right));
        }
        if !ink(row, col + 1) {
            edges.insert(((x + 1, y + 1), Direction::Down));
        }
        if !ink(row - 1, col) {
            edges.insert(((x + 1, y), Direction::Left));
        }
    }
    edges
}

/// Keep only the corners where the direction changes, starting at the
/// smallest one
fn simplify(path: &[Edge]) -> Vec<GridCorner> {
    let count = path.len();
    let mut corners: Vec<GridCorner> = (0..count)
        .filter(|&index| {
            let (_, incoming) = path[(index + count - 1) % count];
            let (_, outgoing) = path[index];
            incoming != outgoing
        })
        .map(|index| path[index].0)
        .collect();

    if let Some(smallest) = corners
        .iter()
        .enumerate()
        .min_by_key(|&(_, corner)| *corner)
        .map(|(index, _)| index)
    {
        corners.rotate_left(smallest);
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shoelace(contour: &[GridCorner]) -> i32 {
        let count = contour.len();
        (0..count)
            .map(|index| {
                let (x0, y0) = contour[index];
                let (x1, y1) = contour[(index + 1) % count];
                x0 * y1 - x1 * y0
            })
            .sum::<i32>()
    }

    #[test]
    fn single_pixel() {
        let contours = trace(&Bitmap::from_art(&["#"]));
        assert_eq!(contours, vec![vec![(0, 0), (0, 1), (1, 1), (1, 0)]]);
    }

    #[test]
    fn adjacent_pixels_merge() {
        let contours = trace(&Bitmap::from_art(&["##", "#."]));
        assert_eq!(
            contours,
            vec![vec![(0, 0), (0, 2), (2, 2), (2, 1), (1, 1), (1, 0)]]
        );
    }

    #[test]
    fn diagonal_touch_stays_separate() {
        let contours = trace(&Bitmap::from_art(&[".#", "#."]));
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|contour| contour.len() == 4));
    }

    #[test]
    fn counters_run_the_other_way() {
        let contours = trace(&Bitmap::from_art(&["###", "#.#", "###"]));
        assert_eq!(contours.len(), 2);
        let outer = &contours[0];
        let inner = &contours[1];
        assert_eq!(outer, &vec![(0, 0), (0, 3), (3, 3), (3, 0)]);
        assert_eq!(inner, &vec![(1, 1), (2, 1), (2, 2), (1, 2)]);
        // twice the signed area: clockwise is negative
        assert_eq!(shoelace(outer), -18);
        assert_eq!(shoelace(inner), 2);
    }

    #[test]
    fn empty_bitmap_has_no_contours() {
        assert!(trace(&Bitmap::new(1, 1)).is_empty());
    }
}
