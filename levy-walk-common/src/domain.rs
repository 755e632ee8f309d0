use crate::error::{Result, SimulationError};
use crate::vecmath::Vec2;
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` on one axis.
///
/// Written in config files as a two-element array, e.g. `x_range = [0.0, 100.0]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        AxisRange { min, max }
    }

    /// Inclusive on both ends. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn validate(&self, axis: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimulationError::invalid(format!(
                "{axis}_range bounds must be finite, got ({}, {})",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(SimulationError::invalid(format!(
                "{axis}_range min ({}) must be less than max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        AxisRange { min, max }
    }
}

impl From<AxisRange> for (f64, f64) {
    fn from(range: AxisRange) -> Self {
        (range.min, range.max)
    }
}

/// The closed rectangle `x × y` the walkers are confined to.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Domain {
    /// Builds a domain, rejecting empty or non-finite ranges.
    pub fn new(x: AxisRange, y: AxisRange) -> Result<Self> {
        x.validate("x")?;
        y.validate("y")?;
        Ok(Domain { x, y })
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        self.x.contains(pos.x) && self.y.contains(pos.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x.min + self.x.span() * 0.5,
            self.y.min + self.y.span() * 0.5,
        )
    }
}
