use crate::domain::{AxisRange, Domain};
use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Validated parameters for a single simulation run at one exponent.
///
/// Only obtainable through [`SimulationConfig::new`], so holding one means every
/// check has already passed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    walker_count: usize,
    step_count: usize,
    alpha: f64,
    domain: Domain,
}

impl SimulationConfig {
    pub fn new(
        walker_count: usize,
        step_count: usize,
        alpha: f64,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self> {
        if walker_count == 0 {
            return Err(SimulationError::invalid("walker_count must be greater than 0"));
        }
        if step_count == 0 {
            return Err(SimulationError::invalid("step_count must be greater than 0"));
        }
        if walker_count.checked_mul(step_count).is_none() {
            return Err(SimulationError::invalid(format!(
                "walker_count ({walker_count}) x step_count ({step_count}) overflows the batch size"
            )));
        }
        validate_alpha(alpha)?;
        let domain = Domain::new(x_range.into(), y_range.into())?;

        Ok(Self {
            walker_count,
            step_count,
            alpha,
            domain,
        })
    }

    pub fn walker_count(&self) -> usize {
        self.walker_count
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Power-law exponent of the step length distribution.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Same run shape with a different exponent.
    pub fn with_alpha(&self, alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        Ok(Self { alpha, ..self.clone() })
    }
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(SimulationError::invalid(format!(
            "alpha must be a finite value greater than 0, got {alpha}"
        )));
    }
    Ok(())
}

// Run shape shared by every exponent in a sweep, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationSection {
    pub walker_count: usize,
    pub step_count: usize,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Base seed. When absent the engine seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Exponents to simulate, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SweepConfig {
    #[serde(default = "default_alpha_min")]
    pub alpha_min: f64,
    #[serde(default = "default_alpha_max")]
    pub alpha_max: f64,
    #[serde(default = "default_alpha_count")]
    pub alpha_count: usize,
    /// Explicit exponent list; overrides min/max/count when present.
    #[serde(default)]
    pub alphas: Option<Vec<f64>>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            alpha_min: default_alpha_min(),
            alpha_max: default_alpha_max(),
            alpha_count: default_alpha_count(),
            alphas: None,
        }
    }
}

impl SweepConfig {
    fn validate(&self) -> Result<()> {
        if let Some(alphas) = &self.alphas {
            if alphas.is_empty() {
                return Err(SimulationError::invalid("sweep.alphas must not be empty"));
            }
            for &alpha in alphas {
                validate_alpha(alpha)?;
            }
            return Ok(());
        }
        if self.alpha_count == 0 {
            return Err(SimulationError::invalid("sweep.alpha_count must be at least 1"));
        }
        validate_alpha(self.alpha_min)?;
        validate_alpha(self.alpha_max)?;
        if self.alpha_min > self.alpha_max {
            return Err(SimulationError::invalid(format!(
                "sweep.alpha_min ({}) must not exceed sweep.alpha_max ({})",
                self.alpha_min, self.alpha_max
            )));
        }
        Ok(())
    }
}

fn default_alpha_min() -> f64 {
    0.5
}

fn default_alpha_max() -> f64 {
    2.5
}

fn default_alpha_count() -> usize {
    12
}

/// Summary file formats understood by the report writer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default = "default_save_summary")]
    pub save_summary: bool,
    pub format: Option<String>, // Summary format: "json", "csv"
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            save_summary: default_save_summary(),
            format: None,
        }
    }
}

fn default_base_filename() -> String {
    "levy_walk".to_string()
}

fn default_save_summary() -> bool {
    true
}

/// Top-level run configuration, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RunConfig {
    pub simulation: SimulationSection,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl RunConfig {
    /// Loads and validates the run configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let config_str = std::fs::read_to_string(path_ref).map_err(|e| SimulationError::ConfigFile {
            path: path_ref.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str::<RunConfig>(&config_str)
            .map_err(|e| SimulationError::ConfigFile {
                path: path_ref.to_path_buf(),
                message: e.to_string(),
            })?
            .validated()
    }

    /// Parses and validates configuration held in memory.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str::<RunConfig>(source)
            .map_err(|e| SimulationError::invalid(e.to_string()))?
            .validated()
    }

    fn validated(self) -> Result<Self> {
        // Checks the shape once up front using the first exponent that will run.
        let first_alpha = self
            .sweep
            .alphas
            .as_ref()
            .and_then(|a| a.first().copied())
            .unwrap_or(self.sweep.alpha_min);
        self.sweep.validate()?;
        self.simulation_config(first_alpha)?;
        Ok(self)
    }

    /// The validated per-exponent configuration for one run of the sweep.
    pub fn simulation_config(&self, alpha: f64) -> Result<SimulationConfig> {
        let sim = &self.simulation;
        SimulationConfig::new(
            sim.walker_count,
            sim.step_count,
            alpha,
            sim.x_range.into(),
            sim.y_range.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"
        [simulation]
        walker_count = 3
        step_count = 500
        x_range = [0.0, 100.0]
        y_range = [0.0, 100.0]
        seed = 7
    "#;

    #[test]
    fn rejects_each_invalid_parameter() {
        assert!(SimulationConfig::new(0, 10, 1.0, (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 0, 1.0, (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 10, 0.0, (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 10, -2.0, (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 10, f64::NAN, (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 10, 1.0, (1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(SimulationConfig::new(1, 10, 1.0, (0.0, 1.0), (3.0, 1.0)).is_err());
    }

    #[test]
    fn rejects_batch_too_large_to_address() {
        let err = SimulationConfig::new(usize::MAX, 2, 1.0, (0.0, 1.0), (0.0, 1.0)).unwrap_err();
        assert!(err.is_config_error());
        assert!(SimulationConfig::new(2, usize::MAX / 2 + 1, 1.0, (0.0, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn accepts_valid_parameters() {
        let config = SimulationConfig::new(3, 500, 1.5, (0.0, 100.0), (-10.0, 10.0)).unwrap();
        assert_eq!(config.walker_count(), 3);
        assert_eq!(config.step_count(), 500);
        assert_eq!(config.alpha(), 1.5);
        assert_eq!(config.domain().y, AxisRange::new(-10.0, 10.0));
    }

    #[test]
    fn with_alpha_keeps_shape_and_validates() {
        let config = SimulationConfig::new(2, 4, 1.0, (0.0, 1.0), (0.0, 1.0)).unwrap();
        let other = config.with_alpha(2.0).unwrap();
        assert_eq!(other.alpha(), 2.0);
        assert_eq!(other.step_count(), 4);
        assert!(config.with_alpha(0.0).is_err());
    }

    #[test]
    fn sections_default_to_demo_sweep() {
        let config = RunConfig::from_toml_str(DEMO).unwrap();
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.sweep, SweepConfig::default());
        assert_eq!(config.sweep.alpha_count, 12);
        assert_eq!(config.output.base_filename, "levy_walk");
        assert!(config.output.save_summary);
    }

    #[test]
    fn invalid_sweep_is_rejected_at_load() {
        let bad_count = format!("{DEMO}\n[sweep]\nalpha_count = 0\n");
        assert!(RunConfig::from_toml_str(&bad_count).is_err());

        let bad_order = format!("{DEMO}\n[sweep]\nalpha_min = 3.0\nalpha_max = 1.0\n");
        assert!(RunConfig::from_toml_str(&bad_order).is_err());

        let bad_list = format!("{DEMO}\n[sweep]\nalphas = [1.0, -1.0]\n");
        assert!(RunConfig::from_toml_str(&bad_list).is_err());
    }

    #[test]
    fn invalid_ranges_are_rejected_at_load() {
        let source = DEMO.replace("x_range = [0.0, 100.0]", "x_range = [100.0, 0.0]");
        let err = RunConfig::from_toml_str(&source).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("levy_walk_missing_config_for_test.toml");
        let err = RunConfig::load(&path).unwrap_err();
        assert!(matches!(err, SimulationError::ConfigFile { .. }));
        assert!(err.to_string().contains("levy_walk_missing_config_for_test.toml"));
    }

    #[test]
    fn output_format_names() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("csv"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("bincode"), None);
    }
}
