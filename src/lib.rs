//! Lévy-walk trajectory generation for independent walkers in a rectangular domain.
//!
//! [`TrajectorySimulator`] draws a uniform start per walker, then per tick asks a
//! [`StepSampler`] for a power-law length and uniform heading, lets a
//! [`BoundaryPolicy`] accept or discard the candidate, and records the result.

pub mod boundary;
pub mod report;
pub mod sampler;
pub mod simulation;
pub mod stats;
pub mod sweep;

pub use boundary::{AcceptOrStay, BoundaryPolicy};
pub use levy_walk_common::{
    AxisRange, Domain, Result, RunConfig, SimulationConfig, SimulationError, Trajectory,
    TrajectoryBatch, Vec2,
};
pub use sampler::{LevyStepSampler, Step, StepSampler};
pub use simulation::{derive_seed, entropy_seed, walker_seed, MoveTally, TrajectorySimulator};
pub use stats::{summarize, ExplorationSummary};
pub use sweep::{run_configured_sweep, run_sweep, AlphaSweep, SweepEntry};
