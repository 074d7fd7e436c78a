use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tickbench::{App, HarnessConfig};

/// Measure re-arm latency of single-shot timers on the host event loop.
#[derive(Debug, Parser)]
#[command(name = "tickbench", version, about)]
struct Cli {
    /// Path to the harness configuration file.
    #[arg(long, default_value = "tickbench.yml")]
    config: PathBuf,

    /// Template used to seed the configuration file when it does not exist.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Override the number of fire-and-rearm cycles.
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the timer interval, in microseconds.
    #[arg(long)]
    interval_us: Option<u64>,

    /// Override the wall-clock deadline, in milliseconds.
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Override the number of warm-up pumps.
    #[arg(long)]
    warmup: Option<u32>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print nothing; only set the exit code.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !cli.quiet {
                eprintln!("tickbench: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> tickbench::Result<()> {
    let mut config = match &cli.source {
        Some(source) => HarnessConfig::load_or_seed(&cli.config, source)?,
        None => HarnessConfig::load(&cli.config)?,
    };

    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(interval_us) = cli.interval_us {
        config.interval_us = interval_us;
    }
    if let Some(deadline_ms) = cli.deadline_ms {
        config.deadline_ms = deadline_ms;
    }
    if let Some(warmup) = cli.warmup {
        config.warmup_pumps = warmup;
    }
    config.validate()?;

    let mut app = App::try_new()?;

    app.warm_up(config.warmup_pumps)?;
    let report = app.run_probe(&config.probe_spec())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        println!("{}", report);
    }

    report.verify()
}
