use crate::boundary::{AcceptOrStay, BoundaryPolicy};
use crate::sampler::{LevyStepSampler, StepSampler};
use levy_walk_common::{
    angle_to_vec, Result, SimulationConfig, SimulationError, TrajectoryBatch, Vec2,
};
use log::{debug, trace};
use rand::distr::Uniform;
use rand::prelude::*;
use rayon::prelude::*;

/// SplitMix64 finalizer; nearby inputs map to unrelated outputs.
#[inline]
pub fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derives the `index`-th child seed of `base_seed`.
#[inline]
pub fn derive_seed(base_seed: u64, index: u64) -> u64 {
    splitmix64(splitmix64(base_seed).wrapping_add(splitmix64(index)))
}

/// Per-walker stream seed for seeded parallel runs.
#[inline]
pub fn walker_seed(base_seed: u64, walker: usize) -> u64 {
    derive_seed(base_seed, walker as u64)
}

/// Accepted/rejected move counts, merged across walkers for logging.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MoveTally {
    pub accepted: u64,
    pub rejected: u64,
}

impl MoveTally {
    fn merge(self, other: MoveTally) -> MoveTally {
        MoveTally {
            accepted: self.accepted + other.accepted,
            rejected: self.rejected + other.rejected,
        }
    }

    pub fn acceptance_rate(&self) -> f64 {
        let total = self.accepted + self.rejected;
        if total == 0 {
            0.0
        } else {
            self.accepted as f64 / total as f64
        }
    }
}

/// Ephemeral state of one walker while its trajectory is being written.
struct Walker {
    position: Vec2,
}

impl Walker {
    /// Proposes one step, lets the policy decide, and returns the committed position.
    #[inline]
    fn tick<S, P, R>(
        &mut self,
        sampler: &S,
        policy: &P,
        config: &SimulationConfig,
        rng: &mut R,
        tally: &mut MoveTally,
    ) -> Vec2
    where
        S: StepSampler,
        P: BoundaryPolicy,
        R: Rng + ?Sized,
    {
        let step = sampler.sample_step(rng);
        let candidate = self.position + angle_to_vec(step.angle) * step.length;
        let committed = policy.resolve(config.domain(), self.position, candidate);
        if committed == candidate {
            tally.accepted += 1;
        } else {
            tally.rejected += 1;
        }
        self.position = committed;
        committed
    }
}

/// Generates trajectory batches for a validated [`SimulationConfig`].
///
/// The step sampler and boundary policy are type parameters so either can be
/// swapped without touching the accumulation loop.
#[derive(Debug, Clone)]
pub struct TrajectorySimulator<S = LevyStepSampler, P = AcceptOrStay> {
    config: SimulationConfig,
    sampler: S,
    policy: P,
    x_dist: Uniform<f64>,
    y_dist: Uniform<f64>,
}

impl TrajectorySimulator {
    /// Lévy-walk simulator with the accept-or-stay boundary policy.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let sampler = LevyStepSampler::new(config.alpha())?;
        Self::with_parts(config, sampler, AcceptOrStay)
    }
}

impl<S: StepSampler, P: BoundaryPolicy> TrajectorySimulator<S, P> {
    pub fn with_parts(config: SimulationConfig, sampler: S, policy: P) -> Result<Self> {
        let domain = config.domain();
        let x_dist = Uniform::new(domain.x.min, domain.x.max)
            .map_err(|e| SimulationError::InvalidConfig(format!("x_range: {e}")))?;
        let y_dist = Uniform::new(domain.y.min, domain.y.max)
            .map_err(|e| SimulationError::InvalidConfig(format!("y_range: {e}")))?;
        Ok(Self {
            config,
            sampler,
            policy,
            x_dist,
            y_dist,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Uniform starting point inside the domain (x drawn first, then y).
    pub fn initial_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = self.x_dist.sample(rng);
        let y = self.y_dist.sample(rng);
        Vec2::new(x, y)
    }

    /// Writes one walker's trajectory into `slots`, one committed position per tick.
    fn fill_walker<R: Rng + ?Sized>(
        &self,
        start: Vec2,
        rng: &mut R,
        slots: &mut [Vec2],
    ) -> MoveTally {
        let mut walker = Walker { position: start };
        let mut tally = MoveTally::default();
        for slot in slots.iter_mut() {
            *slot = walker.tick(&self.sampler, &self.policy, &self.config, rng, &mut tally);
        }
        tally
    }

    /// Runs a single walker from a caller-chosen start (not itself recorded).
    pub fn walk_from<R: Rng + ?Sized>(&self, start: Vec2, rng: &mut R) -> Vec<Vec2> {
        let mut slots = vec![start; self.config.step_count()];
        self.fill_walker(start, rng, &mut slots);
        slots
    }

    /// Runs every walker in order from one random stream.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrajectoryBatch> {
        let walker_count = self.config.walker_count();
        let step_count = self.config.step_count();
        let mut positions = vec![Vec2::zero(); walker_count * step_count];

        let mut total = MoveTally::default();
        for (walker, slots) in positions.chunks_exact_mut(step_count).enumerate() {
            let start = self.initial_position(rng);
            let tally = self.fill_walker(start, rng, slots);
            trace!("Walker {} started at ({:.4}, {:.4}): {:?}", walker, start.x, start.y, tally);
            total = total.merge(tally);
        }

        self.log_run(&total);
        TrajectoryBatch::from_flat(walker_count, step_count, positions)
    }

    /// Runs walkers in parallel; walker `w` draws from its own stream seeded with
    /// [`walker_seed`]`(seed, w)`, so output does not depend on thread count.
    pub fn run_seeded(&self, seed: u64) -> Result<TrajectoryBatch> {
        let walker_count = self.config.walker_count();
        let step_count = self.config.step_count();
        let mut positions = vec![Vec2::zero(); walker_count * step_count];

        // Each walker owns exactly one chunk of the pre-allocated buffer.
        let total = positions
            .par_chunks_mut(step_count)
            .enumerate()
            .map(|(walker, slots)| {
                let mut rng = StdRng::seed_from_u64(walker_seed(seed, walker));
                let start = self.initial_position(&mut rng);
                let tally = self.fill_walker(start, &mut rng, slots);
                trace!(
                    "Walker {} started at ({:.4}, {:.4}): {:?}",
                    walker, start.x, start.y, tally
                );
                tally
            })
            .reduce(MoveTally::default, MoveTally::merge);

        self.log_run(&total);
        TrajectoryBatch::from_flat(walker_count, step_count, positions)
    }

    /// Seeds from OS entropy, then behaves like [`run_seeded`](Self::run_seeded).
    pub fn run_from_entropy(&self) -> Result<TrajectoryBatch> {
        let seed = entropy_seed()?;
        debug!("Drew base seed {} from OS entropy.", seed);
        self.run_seeded(seed)
    }

    fn log_run(&self, total: &MoveTally) {
        debug!(
            "alpha={:.3}: {} walkers x {} steps, {} accepted / {} rejected ({:.1}% accepted)",
            self.config.alpha(),
            self.config.walker_count(),
            self.config.step_count(),
            total.accepted,
            total.rejected,
            total.acceptance_rate() * 100.0
        );
    }
}

/// A fresh base seed from the operating system.
pub fn entropy_seed() -> Result<u64> {
    let mut rng = StdRng::try_from_os_rng()
        .map_err(|e| SimulationError::EntropyExhausted(e.to_string()))?;
    Ok(rng.random())
}
