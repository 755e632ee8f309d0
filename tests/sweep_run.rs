use levy_walk_common::{OutputFormat, RunConfig};
use levy_walk_engine::report::{summary_rows, write_summary, SummaryRow};
use levy_walk_engine::sweep::run_configured_sweep;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("levy_walk_{}_{}", std::process::id(), name))
}

const CONFIG: &str = r#"
[simulation]
walker_count = 3
step_count = 120
x_range = [0.0, 100.0]
y_range = [0.0, 100.0]
seed = 11

[sweep]
alpha_min = 0.5
alpha_max = 2.5
alpha_count = 4

[output]
base_filename = "unused"
format = "csv"
"#;

#[test]
fn configured_sweep_round_trips_through_file_and_report() {
    let config_path = temp_path("config.toml");
    std::fs::write(&config_path, CONFIG).unwrap();
    let config = RunConfig::load(&config_path).unwrap();

    let entries = run_configured_sweep(&config, config.simulation.seed.unwrap()).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].alpha, 0.5);
    assert_eq!(entries[3].alpha, 2.5);
    for entry in &entries {
        assert_eq!(entry.batch.shape(), (3, 120, 2));
    }

    // Same seed, same sweep.
    let again = run_configured_sweep(&config, 11).unwrap();
    assert!(entries.iter().zip(&again).all(|(a, b)| a.batch == b.batch));

    let json_path = temp_path("summary.json");
    write_summary(&json_path, &entries, OutputFormat::Json).unwrap();
    let json_text = std::fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<SummaryRow> = serde_json::from_str(&json_text).unwrap();
    assert_eq!(parsed, summary_rows(&entries));

    let csv_path = temp_path("summary.csv");
    write_summary(&csv_path, &entries, OutputFormat::Csv).unwrap();
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 5);

    for path in [config_path, json_path, csv_path] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn bad_config_file_is_rejected() {
    let path = temp_path("bad_config.toml");
    std::fs::write(&path, CONFIG.replace("walker_count = 3", "walker_count = 0")).unwrap();
    let err = RunConfig::load(&path).unwrap_err();
    assert!(err.is_config_error());
    let _ = std::fs::remove_file(path);
}
