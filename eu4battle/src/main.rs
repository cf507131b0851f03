use anyhow::{Context, Result};
use clap::Parser;
use eu4battle::{loader, report};
use eu4battle_core::profiling::{self, TraceLevel};
use eu4battle_core::{Battle, DiceRoller, FixedDice, SeededDice};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON) describing both armies
    #[arg(short, long)]
    scenario: PathBuf,

    /// Seed for the combat dice
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Use this die face (0-9) for every roll instead of seeded dice
    #[arg(long, conflicts_with = "seed")]
    roll: Option<i32>,

    /// Override the scenario's day limit
    #[arg(long)]
    max_days: Option<u32>,

    /// Override the scenario's terrain with a preset
    #[arg(long)]
    terrain: Option<String>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Tracy span level (info, debug, trace); only used with the tracy feature
    #[arg(long, default_value = "info")]
    trace_level: TraceLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
    profiling::init_tracy(args.trace_level);

    let mut setup = loader::load_scenario(&args.scenario)?;
    if let Some(max_days) = args.max_days {
        setup.config.max_days = max_days;
    }
    if let Some(name) = &args.terrain {
        setup.terrain = loader::parse_terrain(name)?;
    }

    let dice: Box<dyn DiceRoller> = match args.roll {
        Some(face) => {
            log::info!("Using fixed roll {}", face);
            Box::new(FixedDice::new(face))
        }
        None => {
            log::info!("Using seed {}", args.seed);
            Box::new(SeededDice::new(args.seed))
        }
    };

    let report = Battle::new(&setup, dice)
        .run()
        .context("Battle aborted")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{}", json);
    } else {
        print!("{}", report::render_table(&report));
    }

    Ok(())
}
