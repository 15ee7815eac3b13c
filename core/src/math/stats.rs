use rand::Rng;
use serde::{Deserialize, Serialize};

pub struct StatsHelper;

impl StatsHelper {
    /// Rounds to one decimal place, half away from zero.
    pub fn round_tenth(value: f64) -> f64 {
        (value * 10.0).round() / 10.0
    }

    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Value reached after `index + 1` of `count` equal steps from `start` to `end`.
    pub fn interpolate(start: f64, end: f64, index: usize, count: usize) -> f64 {
        if count == 0 {
            return end;
        }
        start + (index + 1) as f64 * (end - start) / count as f64
    }
}

/// Half-open uniform range `[min, max)`. A degenerate span always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Symmetric span `[-half_width, half_width)`.
    pub const fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn sample_floor<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.sample(rng).floor().max(0.0) as u32
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}
