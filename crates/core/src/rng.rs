//! Deterministic pseudo-random numbers for effects and demos.

use crate::types::Vec3;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`; `max == 0` yields 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // High 24 bits are the best mixed in an LCG and fit the mantissa.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Value in `[min, max)`.
    pub fn next_between(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Random point in the unit cube.
    pub fn random_vec3(&mut self) -> Vec3 {
        Vec3::random_with(|| self.next_f32())
    }
}
