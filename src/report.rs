//! Writes per-exponent exploration summaries (never the trajectories themselves).

use crate::sweep::SweepEntry;
use levy_walk_common::{OutputFormat, Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One report line per exponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub alpha: f64,
    pub walker_count: usize,
    pub step_count: usize,
    pub mean_step_displacement: f64,
    pub moved_fraction: f64,
    pub max_jump: f64,
    pub mean_net_displacement: f64,
    pub mean_radius_of_gyration: f64,
}

impl From<&SweepEntry> for SummaryRow {
    fn from(entry: &SweepEntry) -> Self {
        let s = &entry.summary;
        SummaryRow {
            alpha: entry.alpha,
            walker_count: s.walker_count,
            step_count: s.step_count,
            mean_step_displacement: s.mean_step_displacement,
            moved_fraction: s.moved_fraction,
            max_jump: s.max_jump,
            mean_net_displacement: s.mean_net_displacement,
            mean_radius_of_gyration: s.mean_radius_of_gyration,
        }
    }
}

pub fn summary_rows(entries: &[SweepEntry]) -> Vec<SummaryRow> {
    entries.iter().map(SummaryRow::from).collect()
}

pub fn write_json<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows).map_err(|e| SimulationError::Report(e.to_string()))
}

pub fn write_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| SimulationError::Report(e.to_string()))?;
    }
    csv_writer.flush().map_err(|e| SimulationError::Report(e.to_string()))
}

/// `<base_filename>_summary.<ext>`
pub fn summary_path(base_filename: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{}_summary.{}", base_filename, format.extension()))
}

/// Writes the sweep summary to `path` in the requested format.
pub fn write_summary(path: &Path, entries: &[SweepEntry], format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| SimulationError::Report(format!("creating '{}': {}", path.display(), e)))?;
    let writer = BufWriter::new(file);
    let rows = summary_rows(entries);
    match format {
        OutputFormat::Json => write_json(writer, &rows),
        OutputFormat::Csv => write_csv(writer, &rows),
    }
}
