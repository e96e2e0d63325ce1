use std::{path::PathBuf, process};

use anyhow::{bail, Result};
use clap::Parser;
use touch_replay::{parse_expected_kinds, parse_trace, replay, Preset, ReplayConfig};

#[derive(Debug, Parser)]
#[command(name = "touch_replay")]
#[command(about = "Replay a recorded touch trace through the gesture and pull-to-refresh engines")]
struct Cli {
    /// CSV trace: `touch,ms,phase,x,y[,scroll_top]`.
    trace: PathBuf,
    /// Expected event kinds, one per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// TOML overrides for gesture and pull thresholds.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Log every session transition.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };
    let (gesture, pull) = config.resolve(cli.preset)?;
    let samples = parse_trace(&cli.trace)?;
    let output = replay(&samples, gesture, pull)?;

    println!("event,ms,kind,x,y");
    for event in &output.events {
        println!("event,{},{},{},{}", event.ms, event.kind, event.x, event.y);
    }
    eprintln!(
        "samples={} prevented_moves={} refreshes={}",
        output.stats.samples, output.stats.prevented_moves, output.stats.refreshes
    );

    if let Some(expect_path) = cli.expect {
        let expected = parse_expected_kinds(&expect_path)?;
        let actual = output.kinds();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            bail!("event sequence mismatch");
        }
    }

    Ok(())
}
