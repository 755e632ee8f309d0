pub mod config;
pub mod domain;
pub mod error;
pub mod trajectory;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{
    OutputConfig, OutputFormat, RunConfig, SimulationConfig, SimulationSection, SweepConfig,
};
pub use domain::{AxisRange, Domain};
pub use error::{Result, SimulationError};
pub use trajectory::{Trajectory, TrajectoryBatch};
pub use vecmath::{angle_to_vec, Vec2};
