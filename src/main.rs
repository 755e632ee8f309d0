use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use levy_walk_common::{OutputFormat, RunConfig};
use levy_walk_engine::report::{summary_path, write_summary};
use levy_walk_engine::sweep::{run_configured_sweep, AlphaSweep};
use levy_walk_engine::entropy_seed;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Command-line arguments for the Lévy-walk engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the run configuration (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Base seed, overriding `simulation.seed` from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Summary format ("json" or "csv"), overriding `output.format`
    #[arg(long)]
    format: Option<String>,
}

fn resolve_format(requested: Option<&str>) -> OutputFormat {
    match requested {
        None => OutputFormat::Json,
        Some(name) => OutputFormat::parse(name).unwrap_or_else(|| {
            warn!("Unknown output format: {}. Using JSON instead.", name);
            OutputFormat::Json
        }),
    }
}

fn main() -> Result<()> {
    // Default to info unless RUST_LOG says otherwise
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting Levy Walk Engine...");
    let args = Args::parse();

    // --- Load Configuration ---
    let config = RunConfig::load(&args.config)
        .with_context(|| format!("loading configuration from '{}'", args.config.display()))?;
    debug!("Run configuration: {:#?}", config);

    let sweep = AlphaSweep::from_config(&config.sweep)?;
    info!(
        "{} walkers x {} steps on [{}, {}] x [{}, {}], {} exponents from {:.3} to {:.3}",
        config.simulation.walker_count,
        config.simulation.step_count,
        config.simulation.x_range.min,
        config.simulation.x_range.max,
        config.simulation.y_range.min,
        config.simulation.y_range.max,
        sweep.len(),
        sweep.alphas().first().copied().unwrap_or_default(),
        sweep.alphas().last().copied().unwrap_or_default()
    );

    let seed = match args.seed.or(config.simulation.seed) {
        Some(seed) => seed,
        None => {
            let seed = entropy_seed()?;
            info!("No seed configured; drew {} from OS entropy.", seed);
            seed
        }
    };
    info!("Base seed: {}", seed);
    info!("Using {} Rayon threads.", rayon::current_num_threads());

    // --- Run Sweep ---
    let start_time = Instant::now();
    let entries = match run_configured_sweep(&config, seed) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Sweep failed: {}", e);
            return Err(e.into());
        }
    };
    info!("Sweep finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    // --- Save Summary ---
    if config.output.save_summary {
        let requested = args.format.as_deref().or(config.output.format.as_deref());
        let format = resolve_format(requested);
        let path = summary_path(&config.output.base_filename, format);
        write_summary(&path, &entries, format)
            .with_context(|| format!("writing summary to '{}'", path.display()))?;
        info!("Summary for {} exponents saved to {}", entries.len(), path.display());
    } else {
        info!("Skipping summary output as per config (save_summary is false).");
    }

    info!("Simulation Complete.");
    Ok(())
}
