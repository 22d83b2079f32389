//! Binary pixel bitmaps
//!
//! Rows are stored bottom-up: row 0 is the lowest row of the glyph box, so
//! row indices grow in the same direction as font y coordinates.

use std::fmt;

/// A position on the font's pixel grid, or a delta between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PixelOffset {
    pub row: i32,
    pub col: i32,
}

impl PixelOffset {
    pub const ZERO: PixelOffset = PixelOffset { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::ops::Add for PixelOffset {
    type Output = PixelOffset;

    fn add(self, other: PixelOffset) -> PixelOffset {
        PixelOffset::new(self.row + other.row, self.col + other.col)
    }
}

impl std::ops::Sub for PixelOffset {
    type Output = PixelOffset;

    fn sub(self, other: PixelOffset) -> PixelOffset {
        PixelOffset::new(self.row - other.row, self.col - other.col)
    }
}

impl fmt::Display for PixelOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A two-dimensional binary matrix, `true` meaning ink
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Create an inkless bitmap of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Create an inkless bitmap with the same dimensions as `other`
    pub fn blank_like(other: &Bitmap) -> Self {
        Self::new(other.width, other.height)
    }

    /// Build a bitmap from rows of `'#'` (ink) and `'.'` (paper),
    /// listed top row first the way glyphs are usually drawn.
    ///
    /// Rows shorter than the longest row are padded with paper.
    pub fn from_art(art: &[&str]) -> Self {
        let height = art.len();
        let width = art.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut bitmap = Self::new(width, height);
        for (top_index, line) in art.iter().enumerate() {
            let row = height - 1 - top_index;
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    bitmap.set(row, col, true);
                }
            }
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.pixels[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, ink: bool) {
        if row < self.height && col < self.width {
            self.pixels[row * self.width + col] = ink;
        }
    }

    pub fn has_ink(&self) -> bool {
        self.pixels.iter().any(|&ink| ink)
    }

    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&ink| ink).count()
    }

    /// Iterate over `(row, col)` of every ink pixel in row-major order
    pub fn ink_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, &ink)| ink)
            .map(move |(index, _)| (index / self.width, index % self.width))
    }

    /// Crop to the minimal bounding box of the ink.
    ///
    /// Returns the cropped bitmap and the position of its origin within
    /// `self`. A bitmap without ink crops to a 1×1 empty bitmap at the origin.
    pub fn crop(&self) -> (Bitmap, PixelOffset) {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (row, col) in self.ink_pixels() {
            bounds = Some(match bounds {
                None => (row, col, row, col),
                Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(col), r1.max(row), c1.max(col)),
            });
        }

        let Some((row_min, col_min, row_max, col_max)) = bounds else {
            return (Bitmap::new(1, 1), PixelOffset::ZERO);
        };

        let mut cropped = Bitmap::new(col_max - col_min + 1, row_max - row_min + 1);
        for (row, col) in self.ink_pixels() {
            cropped.set(row - row_min, col - col_min, true);
        }
        (cropped, PixelOffset::new(row_min as i32, col_min as i32))
    }

    /// Paint the ink of `stamp` onto `self` at `at`, but only where
    /// `allowed` also has ink.
    ///
    /// Fails on the first stamp pixel that would fall on paper in `allowed`
    /// (or outside of it); `self` may then be partially painted.
    pub fn paint_within(&mut self, stamp: &Bitmap, at: PixelOffset, allowed: &Bitmap) -> bool {
        for (row, col) in stamp.ink_pixels() {
            let target_row = at.row + row as i32;
            let target_col = at.col + col as i32;
            if target_row < 0 || target_col < 0 {
                return false;
            }
            let (target_row, target_col) = (target_row as usize, target_col as usize);
            if !allowed.get(target_row, target_col) {
                return false;
            }
            self.set(target_row, target_col, true);
        }
        true
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        for row in (0..self.height).rev() {
            let line: String = (0..self.width)
                .map(|col| if self.get(row, col) { '#' } else { '.' })
                .collect();
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
