use anyhow::Result;
use cellsim_lib::app::HeadlessRunner;
use cellsim_lib::model::config::AppConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of steps to run (overrides the config file)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final environment snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<String>,

    /// Print the run report as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    cellsim_core::init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    let steps = args.steps.unwrap_or(config.simulation.max_steps);

    let mut runner = HeadlessRunner::new(config)?;
    if let Some(path) = args.snapshot {
        runner = runner.with_snapshot_path(path);
    }
    runner.shutdown().listen_for_ctrl_c();

    let (reason, report) = runner.run(steps)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{:?} after {} steps: {} cells, {} divisions, max generation {} (seed {})",
            reason, report.steps, report.cells, report.divisions, report.max_generation, report.seed
        );
    }
    Ok(())
}
