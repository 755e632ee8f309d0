use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration, simulation and reporting.
///
/// Every variant is raised before (or instead of) producing output; a batch is
/// never handed back partially filled.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("random source unavailable: {0}")]
    EntropyExhausted(String),
    #[error("failed to load config file '{}': {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
    #[error("failed to write report: {0}")]
    Report(String),
}

impl SimulationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimulationError::InvalidConfig(message.into())
    }

    /// True for the configuration class of errors (bad parameters or bad file).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidConfig(_) | SimulationError::ConfigFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
