//! Command-line driver for the valley simulation.

mod telemetry;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use valley_core::{RunConfig, TickOrder};
use valley_world::{exchange, Census, Snapshot, Valley};

#[derive(Parser)]
#[command(name = "valley")]
#[command(version)]
#[command(about = "Grid-based predator/prey valley simulation")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run(RunArgs),

    /// Write the default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "valley.json")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Number of ticks (defaults to the configuration's num_ticks)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Start from a text scene (`Species row column` per line)
    #[arg(short, long, conflicts_with = "load")]
    import: Option<PathBuf>,

    /// Resume from a binary snapshot
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Raster scan semantics
    #[arg(long, value_enum)]
    tick_order: Option<TickOrderArg>,

    /// Write the final scene as text
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write a binary snapshot at the end
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Print an ASCII map every this many ticks
    #[arg(long)]
    show_every: Option<u64>,

    /// Print the final census as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TickOrderArg {
    Live,
    Snapshot,
}

impl From<TickOrderArg> for TickOrder {
    fn from(arg: TickOrderArg) -> Self {
        match arg {
            TickOrderArg::Live => TickOrder::LiveScan,
            TickOrderArg::Snapshot => TickOrder::Snapshot,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.log_json)?;

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::InitConfig { output } => init_config(output),
    }
}

fn load_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(ticks) = args.ticks {
        config.num_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.valley.seed = seed;
    }
    if let Some(order) = args.tick_order {
        config.valley.tick_order = order.into();
    }
    config.valley.validate()?;
    Ok(config)
}

fn build_valley(args: &RunArgs, config: &RunConfig) -> Result<Valley> {
    if let Some(path) = &args.load {
        let snapshot = Snapshot::load(path)
            .with_context(|| format!("loading snapshot {}", path.display()))?;
        if args.seed.is_some() || args.tick_order.is_some() {
            info!("Snapshot configuration takes precedence over --seed and --tick-order");
        }
        return Ok(Valley::restore(snapshot)?);
    }

    if let Some(path) = &args.import {
        let valley = exchange::import_file(path, config.valley.clone())
            .with_context(|| format!("importing {}", path.display()))?;
        return Ok(valley);
    }

    Ok(Valley::with_default_units(config.valley.clone())?)
}

fn run(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let mut valley = build_valley(&args, &config)?;

    info!(
        ticks = config.num_ticks,
        size = valley.size(),
        seed = valley.config().seed,
        tick_order = ?valley.config().tick_order,
        "Starting valley"
    );

    let census = match args.show_every {
        Some(0) => bail!("--show-every must be at least 1"),
        Some(every) => {
            println!("{}", valley.render_ascii());
            let mut remaining = config.num_ticks;
            let mut census = valley.census();
            while remaining > 0 {
                let chunk = remaining.min(every);
                census = valley.run(chunk, config.log_every);
                remaining -= chunk;
                println!("tick {}: {}", valley.tick_count(), census);
                println!("{}", valley.render_ascii());
            }
            census
        }
        None => valley.run(config.num_ticks, config.log_every),
    };

    print_census(&census, args.json)?;

    if let Some(path) = &args.export {
        exchange::export_file(&valley, path)
            .with_context(|| format!("exporting to {}", path.display()))?;
        info!(path = %path.display(), "Scene exported");
    }
    if let Some(path) = &args.save {
        valley
            .snapshot()
            .save(path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
    }

    Ok(())
}

fn print_census(census: &Census, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(census)?);
    } else {
        println!("Final census at tick {}", census.tick);
        for (species, count) in &census.counts {
            println!("  {:<12} {}", species.name(), count);
        }
        println!("  {:<12} {}", "total", census.total());
    }
    Ok(())
}

fn init_config(output: PathBuf) -> Result<()> {
    let json = RunConfig::default().to_json_string()?;
    std::fs::write(&output, json)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Default configuration written to {}", output.display());
    Ok(())
}
