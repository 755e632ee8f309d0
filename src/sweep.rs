//! Runs one batch per exponent so their exploration patterns can be compared.

use crate::simulation::{derive_seed, TrajectorySimulator};
use crate::stats::{summarize, ExplorationSummary};
use levy_walk_common::{
    Result, RunConfig, SimulationConfig, SimulationError, SweepConfig, TrajectoryBatch,
};
use log::info;
use std::time::Instant;

/// Salt separating sweep-entry seeds from walker seeds derived from the same base.
const SWEEP_SEED_SALT: u64 = 0x5EED_5A17_0000_0000;

/// Base seed of sweep entry `index`; its walkers then derive their own streams from it.
#[inline]
pub fn entry_seed(base_seed: u64, index: usize) -> u64 {
    derive_seed(base_seed ^ SWEEP_SEED_SALT, index as u64)
}

/// The ordered list of exponents to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaSweep {
    alphas: Vec<f64>,
}

impl AlphaSweep {
    /// `count` evenly spaced exponents from `min` to `max`, both inclusive.
    pub fn linspace(min: f64, max: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(SimulationError::InvalidConfig("sweep needs at least one exponent".into()));
        }
        let alphas = if count == 1 {
            vec![min]
        } else {
            let step = (max - min) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { max } else { min + step * i as f64 })
                .collect()
        };
        Self::explicit(alphas)
    }

    pub fn explicit(alphas: Vec<f64>) -> Result<Self> {
        if alphas.is_empty() {
            return Err(SimulationError::InvalidConfig("sweep needs at least one exponent".into()));
        }
        if let Some(bad) = alphas.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(SimulationError::InvalidConfig(format!(
                "sweep exponent must be a finite value greater than 0, got {bad}"
            )));
        }
        Ok(Self { alphas })
    }

    pub fn from_config(config: &SweepConfig) -> Result<Self> {
        match &config.alphas {
            Some(list) => Self::explicit(list.clone()),
            None => Self::linspace(config.alpha_min, config.alpha_max, config.alpha_count),
        }
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    pub fn len(&self) -> usize {
        self.alphas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphas.is_empty()
    }
}

/// One exponent's output: the `(alpha, batch)` pair a renderer draws as a
/// panel, plus its summary.
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub alpha: f64,
    pub batch: TrajectoryBatch,
    pub summary: ExplorationSummary,
}

/// Runs the sweep with every entry's walkers in parallel.
///
/// All configurations are validated before the first draw.
pub fn run_sweep(
    base: &SimulationConfig,
    sweep: &AlphaSweep,
    base_seed: u64,
) -> Result<Vec<SweepEntry>> {
    let simulators = sweep
        .alphas()
        .iter()
        .map(|&alpha| TrajectorySimulator::new(base.with_alpha(alpha)?))
        .collect::<Result<Vec<_>>>()?;

    let mut entries = Vec::with_capacity(simulators.len());
    for (index, sim) in simulators.iter().enumerate() {
        let start = Instant::now();
        let alpha = sim.config().alpha();
        let batch = sim.run_seeded(entry_seed(base_seed, index))?;
        let summary = summarize(&batch);
        info!(
            "[{}/{}] alpha = {:.3} | mean step {:.3} | moved {:.1}% | max jump {:.2} | Rg {:.2} | {:.1} ms",
            index + 1,
            simulators.len(),
            alpha,
            summary.mean_step_displacement,
            summary.moved_fraction * 100.0,
            summary.max_jump,
            summary.mean_radius_of_gyration,
            start.elapsed().as_secs_f64() * 1000.0
        );
        entries.push(SweepEntry { alpha, batch, summary });
    }
    Ok(entries)
}

/// Convenience wrapper: sweep described entirely by a loaded [`RunConfig`].
pub fn run_configured_sweep(config: &RunConfig, base_seed: u64) -> Result<Vec<SweepEntry>> {
    let sweep = AlphaSweep::from_config(&config.sweep)?;
    let base = config.simulation_config(sweep.alphas()[0])?;
    run_sweep(&base, &sweep, base_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_matches_demo_exponents() {
        let sweep = AlphaSweep::linspace(0.5, 2.5, 12).unwrap();
        assert_eq!(sweep.len(), 12);
        assert_eq!(sweep.alphas()[0], 0.5);
        assert_eq!(sweep.alphas()[11], 2.5);
        assert_relative_eq!(sweep.alphas()[1], 0.5 + 2.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn single_point_linspace() {
        assert_eq!(AlphaSweep::linspace(1.7, 3.0, 1).unwrap().alphas(), &[1.7]);
    }

    #[test]
    fn invalid_sweeps_are_rejected() {
        assert!(AlphaSweep::linspace(0.5, 2.5, 0).is_err());
        assert!(AlphaSweep::linspace(0.0, 2.5, 3).is_err());
        assert!(AlphaSweep::explicit(vec![]).is_err());
        assert!(AlphaSweep::explicit(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn explicit_list_overrides_range() {
        let config = SweepConfig {
            alphas: Some(vec![2.0, 1.0]),
            ..SweepConfig::default()
        };
        assert_eq!(AlphaSweep::from_config(&config).unwrap().alphas(), &[2.0, 1.0]);
    }

    #[test]
    fn entries_follow_sweep_order_and_shape() {
        let base = SimulationConfig::new(2, 20, 1.0, (0.0, 10.0), (0.0, 10.0)).unwrap();
        let sweep = AlphaSweep::explicit(vec![0.8, 1.6, 2.4]).unwrap();
        let entries = run_sweep(&base, &sweep, 9).unwrap();
        assert_eq!(entries.len(), 3);
        for (entry, alpha) in entries.iter().zip(sweep.alphas()) {
            assert_eq!(entry.alpha, *alpha);
            assert_eq!(entry.batch.shape(), (2, 20, 2));
            assert_eq!(entry.summary.walker_count, 2);
        }
    }

    #[test]
    fn entry_seeds_are_distinct() {
        let seeds: Vec<u64> = (0..4u64)
            .flat_map(|base| (0..12).map(move |i| entry_seed(base, i)))
            .collect();
        for (i, a) in seeds.iter().enumerate() {
            assert!(seeds[i + 1..].iter().all(|b| a != b));
        }
        assert_eq!(entry_seed(7, 3), entry_seed(7, 3));
    }
}
