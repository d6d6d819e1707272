//! Seeded pseudo-random numbers and small sampling helpers.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

const STATE_MASK: u64 = (1 << 48) - 1;

/// Linear congruential generator with the `java.util.Random` parameters.
///
/// The state is kept exact modulo 2^48, so a given seed always produces the
/// same sequence on every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub const MODULUS: u64 = 1 << 48;
    pub const MULTIPLIER: u64 = 25_214_903_917;
    pub const INCREMENT: u64 = 11;
    /// `2^-48`, maps a raw state onto `[0, 1)`.
    pub const NORMALIZER: f64 = 1.0 / Self::MODULUS as f64;

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed & STATE_MASK,
        }
    }

    /// Advances the generator and returns the raw 48-bit state.
    pub fn next_int(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & STATE_MASK;
        self.state
    }

    /// Next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.next_int() as f64 * Self::NORMALIZER
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        // high 32 of the 48 state bits
        (self.next_int() >> 16) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Uniform integer in `[ceil(min), floor(max)]`. `None` when that range is
/// empty.
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Option<i64> {
    let low = min.ceil();
    let high = max.floor();
    if !low.is_finite() || !high.is_finite() || low > high {
        return None;
    }
    Some(rng.random_range(low as i64..=high as i64))
}

/// Random opaque color as a `#rrggbb` string.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=0x00FF_FFFF_u32))
}

/// Uniformly chosen element. `None` for an empty slice.
pub fn array_random<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}
