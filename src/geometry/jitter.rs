//! Element jitter
//!
//! Displaces each element of a glyph by a small random amount. Every glyph
//! draws from its own generator, seeded from the run seed and the glyph's
//! codepoint, so a glyph's jitter does not depend on which other glyphs are
//! in the font and all masters see the same random sequence.

use kurbo::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Standard deviation of the displacement, in units of half a pixel
const SIGMA: f64 = 0.5;

/// Per-glyph jitter source
#[derive(Debug, Clone)]
pub struct Jitter {
    amount: f64,
    rng: StdRng,
}

impl Jitter {
    /// `amount` is the jitter axis factor; zero disables jitter entirely
    pub fn new(seed: u64, codepoint: u32, amount: f64) -> Self {
        let mixed = seed ^ u64::from(codepoint).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            amount,
            rng: StdRng::seed_from_u64(mixed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.amount != 0.0
    }

    /// Displacement for the next element given the pixel pitch
    pub fn next_offset(&mut self, upp_x: f64, upp_y: f64) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let dx = self.amount * self.sample() * upp_x / 2.0;
        let dy = self.amount * self.sample() * upp_y / 2.0;
        Vec2::new(dx, dy)
    }

    /// Normal sample restricted to (-1, 1)
    fn sample(&mut self) -> f64 {
        loop {
            let z: f64 = self.rng.sample::<f64, _>(StandardNormal) * SIGMA;
            if z.abs() < 1.0 {
                return z;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_offsets() {
        let mut first = Jitter::new(7, 0x41, 1.0);
        let mut second = Jitter::new(7, 0x41, 1.0);
        for _ in 0..50 {
            assert_eq!(first.next_offset(100.0, 100.0), second.next_offset(100.0, 100.0));
        }
    }

    #[test]
    fn offsets_stay_within_half_a_pixel() {
        let mut jitter = Jitter::new(1, 0x42, 1.0);
        for _ in 0..1000 {
            let offset = jitter.next_offset(100.0, 80.0);
            assert!(offset.x.abs() < 50.0 && offset.y.abs() < 40.0, "{offset:?}");
        }
    }

    #[test]
    fn zero_amount_never_moves() {
        let mut jitter = Jitter::new(3, 0x43, 0.0);
        assert!(!jitter.is_active());
        assert_eq!(jitter.next_offset(100.0, 100.0), Vec2::ZERO);
    }

    #[test]
    fn glyphs_get_different_sequences() {
        let mut a = Jitter::new(9, 0x61, 1.0);
        let mut b = Jitter::new(9, 0x62, 1.0);
        let first: Vec<_> = (0..4).map(|_| a.next_offset(100.0, 100.0)).collect();
        let second: Vec<_> = (0..4).map(|_| b.next_offset(100.0, 100.0)).collect();
        assert_ne!(first, second);
    }
}
