//! Exploration statistics over a finished batch.

use levy_walk_common::{Trajectory, TrajectoryBatch, Vec2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate exploration measures for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub walker_count: usize,
    pub step_count: usize,
    /// Mean distance between consecutive recorded positions (rejected ticks count as 0).
    pub mean_step_displacement: f64,
    /// Fraction of consecutive recorded pairs that differ; estimates the acceptance rate.
    pub moved_fraction: f64,
    /// Largest single recorded jump.
    pub max_jump: f64,
    /// Mean distance from each walker's first to last recorded position.
    pub mean_net_displacement: f64,
    /// Mean over walkers of the radius of gyration of the visited positions.
    pub mean_radius_of_gyration: f64,
}

#[derive(Debug, Copy, Clone, Default)]
struct WalkerStats {
    jump_sum: f64,
    jumps: usize,
    moves: usize,
    max_jump: f64,
    net: f64,
    gyration: f64,
}

impl WalkerStats {
    fn merge(self, other: WalkerStats) -> WalkerStats {
        WalkerStats {
            jump_sum: self.jump_sum + other.jump_sum,
            jumps: self.jumps + other.jumps,
            moves: self.moves + other.moves,
            max_jump: self.max_jump.max(other.max_jump),
            net: self.net + other.net,
            gyration: self.gyration + other.gyration,
        }
    }
}

fn walker_stats(trajectory: Trajectory<'_>) -> WalkerStats {
    let positions = trajectory.positions();
    let mut stats = WalkerStats::default();

    for pair in positions.windows(2) {
        let jump = pair[0].distance(pair[1]);
        stats.jump_sum += jump;
        stats.jumps += 1;
        if pair[0] != pair[1] {
            stats.moves += 1;
        }
        stats.max_jump = stats.max_jump.max(jump);
    }

    if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
        stats.net = first.distance(*last);
    }
    stats.gyration = radius_of_gyration(positions);
    stats
}

/// Root-mean-square distance of the positions from their centroid.
pub fn radius_of_gyration(positions: &[Vec2]) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }
    let n = positions.len() as f64;
    let sum = positions.iter().fold(Vec2::zero(), |acc, p| acc + *p);
    let centroid = sum * (1.0 / n);
    let mean_sq = positions.iter().map(|p| p.distance_squared(centroid)).sum::<f64>() / n;
    mean_sq.sqrt()
}

/// Summarises a batch. Walkers are measured in parallel.
pub fn summarize(batch: &TrajectoryBatch) -> ExplorationSummary {
    let walkers: Vec<Trajectory<'_>> = batch.trajectories().collect();
    let total = walkers
        .par_iter()
        .map(|t| walker_stats(*t))
        .reduce(WalkerStats::default, WalkerStats::merge);

    let walker_count = batch.walker_count() as f64;
    let (mean_step_displacement, moved_fraction) = if total.jumps > 0 {
        (
            total.jump_sum / total.jumps as f64,
            total.moves as f64 / total.jumps as f64,
        )
    } else {
        (0.0, 0.0)
    };

    ExplorationSummary {
        walker_count: batch.walker_count(),
        step_count: batch.step_count(),
        mean_step_displacement,
        moved_fraction,
        max_jump: total.max_jump,
        mean_net_displacement: total.net / walker_count,
        mean_radius_of_gyration: total.gyration / walker_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_hand_built_batch() {
        // walker 0: (0,0) -> (3,4) -> (3,4); walker 1 never moves.
        let positions = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        let batch = TrajectoryBatch::from_flat(2, 3, positions).unwrap();
        let summary = summarize(&batch);
        assert_eq!(summary.walker_count, 2);
        assert_eq!(summary.step_count, 3);
        assert_relative_eq!(summary.mean_step_displacement, 5.0 / 4.0);
        assert_relative_eq!(summary.moved_fraction, 0.25);
        assert_relative_eq!(summary.max_jump, 5.0);
        assert_relative_eq!(summary.mean_net_displacement, 2.5);
    }

    #[test]
    fn single_tick_batch_has_no_jumps() {
        let batch = TrajectoryBatch::from_flat(1, 1, vec![Vec2::new(2.0, 2.0)]).unwrap();
        let summary = summarize(&batch);
        assert_eq!(summary.mean_step_displacement, 0.0);
        assert_eq!(summary.moved_fraction, 0.0);
        assert_eq!(summary.mean_radius_of_gyration, 0.0);
    }

    #[test]
    fn gyration_of_symmetric_points() {
        let points = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, -1.0),
        ];
        assert_relative_eq!(radius_of_gyration(&points), 1.0);
        assert_eq!(radius_of_gyration(&[]), 0.0);
    }
}
