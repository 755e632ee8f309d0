//! Per-tick step draws: a heavy-tailed length and a uniform heading.

use levy_walk_common::{Result, SimulationError};
use rand::distr::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Pareto};
use std::f64::consts::TAU;

/// One proposed move: a non-negative length and a heading in `[0, 2π)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    pub length: f64,
    pub angle: f64,
}

/// Source of proposed steps for the trajectory simulator.
///
/// Implementations must consume entropy only from the `rng` they are handed.
pub trait StepSampler: Send + Sync {
    fn sample_step<R: Rng + ?Sized>(&self, rng: &mut R) -> Step;
}

/// Power-law step lengths with minimum 0 and unit scale.
///
/// Lengths are `Pareto(scale = 1, shape = alpha) - 1` (the Lomax form), so small
/// `alpha` gives frequent long flights and large `alpha` concentrates steps near 0.
#[derive(Debug, Clone)]
pub struct LevyStepSampler {
    alpha: f64,
    length_dist: Pareto<f64>,
    angle_dist: Uniform<f64>,
}

impl LevyStepSampler {
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "alpha must be a finite value greater than 0, got {alpha}"
            )));
        }
        let length_dist = Pareto::new(1.0, alpha)
            .map_err(|e| SimulationError::InvalidConfig(format!("alpha {alpha}: {e}")))?;
        let angle_dist = Uniform::new(0.0, TAU)
            .map_err(|e| SimulationError::InvalidConfig(format!("angle range: {e}")))?;
        Ok(Self {
            alpha,
            length_dist,
            angle_dist,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl StepSampler for LevyStepSampler {
    #[inline]
    fn sample_step<R: Rng + ?Sized>(&self, rng: &mut R) -> Step {
        // Pareto support starts at the scale (1); shift it to start at 0.
        let length = (self.length_dist.sample(rng) - 1.0).max(0.0);
        let angle = self.angle_dist.sample(rng);
        Step { length, angle }
    }
}
