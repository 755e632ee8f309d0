use crate::error::{Result, SimulationError};
use crate::vecmath::Vec2;
use serde::Serialize;

/// The recorded positions of one walker, one entry per tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Trajectory<'a> {
    positions: &'a [Vec2],
}

impl<'a> Trajectory<'a> {
    pub fn positions(&self) -> &'a [Vec2] {
        self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Vec2> {
        self.positions.iter()
    }

    /// Separate x and y series, the form a plotting collaborator consumes.
    pub fn xy_series(&self) -> (Vec<f64>, Vec<f64>) {
        self.positions.iter().map(|p| (p.x, p.y)).unzip()
    }
}

/// All walker trajectories of one run, shaped `(walker_count, step_count, 2)`.
///
/// Stored as one flat, walker-major buffer: walker `w`, tick `t` lives at
/// `w * step_count + t`. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryBatch {
    walker_count: usize,
    step_count: usize,
    positions: Vec<Vec2>,
}

impl TrajectoryBatch {
    /// Wraps a fully written walker-major buffer.
    pub fn from_flat(walker_count: usize, step_count: usize, positions: Vec<Vec2>) -> Result<Self> {
        if walker_count == 0 || step_count == 0 {
            return Err(SimulationError::invalid("a batch needs at least one walker and one step"));
        }
        let expected = walker_count.checked_mul(step_count).ok_or_else(|| {
            SimulationError::invalid("walker_count * step_count overflows usize")
        })?;
        if positions.len() != expected {
            return Err(SimulationError::invalid(format!(
                "trajectory buffer holds {} positions, expected {} ({} walkers x {} steps)",
                positions.len(),
                expected,
                walker_count,
                step_count
            )));
        }
        Ok(Self {
            walker_count,
            step_count,
            positions,
        })
    }

    pub fn walker_count(&self) -> usize {
        self.walker_count
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// `(walker_count, step_count, 2)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.walker_count, self.step_count, 2)
    }

    /// Trajectory of walker `walker`. Panics if out of range, like slice indexing.
    pub fn trajectory(&self, walker: usize) -> Trajectory<'_> {
        let start = walker * self.step_count;
        Trajectory {
            positions: &self.positions[start..start + self.step_count],
        }
    }

    pub fn get(&self, walker: usize, tick: usize) -> Option<Vec2> {
        if walker >= self.walker_count || tick >= self.step_count {
            return None;
        }
        Some(self.positions[walker * self.step_count + tick])
    }

    pub fn trajectories(&self) -> impl Iterator<Item = Trajectory<'_>> + '_ {
        self.positions
            .chunks_exact(self.step_count)
            .map(|positions| Trajectory { positions })
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Nested `[walker][tick] = [x, y]` copy of the batch.
    pub fn to_nested(&self) -> Vec<Vec<[f64; 2]>> {
        self.trajectories()
            .map(|t| t.iter().map(|p| p.to_array()).collect())
            .collect()
    }

    /// Coordinates flattened in walker, tick, then (x, y) order.
    pub fn to_flat_coords(&self) -> Vec<f64> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> TrajectoryBatch {
        let positions = (0..6).map(|i| Vec2::new(i as f64, -(i as f64))).collect();
        TrajectoryBatch::from_flat(2, 3, positions).unwrap()
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(TrajectoryBatch::from_flat(2, 3, vec![Vec2::zero(); 5]).is_err());
        assert!(TrajectoryBatch::from_flat(0, 3, vec![]).is_err());
    }

    #[test]
    fn layout_is_walker_major() {
        let batch = sample_batch();
        assert_eq!(batch.shape(), (2, 3, 2));
        assert_eq!(batch.get(1, 0), Some(Vec2::new(3.0, -3.0)));
        assert_eq!(batch.get(2, 0), None);
        assert_eq!(batch.get(0, 3), None);
        assert_eq!(batch.trajectory(1).positions()[2], Vec2::new(5.0, -5.0));
    }

    #[test]
    fn flat_coords_follow_walker_tick_xy_order() {
        let batch = sample_batch();
        let flat = batch.to_flat_coords();
        assert_eq!(flat.len(), 12);
        assert_eq!(&flat[..4], &[0.0, -0.0, 1.0, -1.0]);
        let nested = batch.to_nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[1][0], [3.0, -3.0]);
    }

    #[test]
    fn xy_series_split_coordinates() {
        let batch = sample_batch();
        let (xs, ys) = batch.trajectory(0).xy_series();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert_eq!(ys, vec![0.0, -1.0, -2.0]);
    }
}
