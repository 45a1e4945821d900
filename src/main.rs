use anyhow::{Context, Result};
use clap::Parser;
use formicary_lib::model::config::AppConfig;
use formicary_lib::model::metrics::init_logging;
use formicary_lib::model::snapshot::{AntSnapshot, WorldSummary};
use formicary_lib::model::world::World;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Initial number of ants (overrides the config)
    #[arg(short, long)]
    ants: Option<usize>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// RNG seed (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the final summary and ant snapshots as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print a one-line status every N ticks (0 disables)
    #[arg(long, default_value_t = 600)]
    report_every: u64,
}

#[derive(Serialize)]
struct SnapshotFile<'a> {
    summary: &'a WorldSummary,
    ants: &'a [AntSnapshot],
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    let ants = args.ants.unwrap_or(config.world.initial_ants);

    let mut world = World::new(config)?;
    world.initialize(ants);
    println!(
        "Running headless: {} ants, {} ticks of {:.4}s",
        ants, args.ticks, args.dt
    );

    for _ in 0..args.ticks {
        world.tick(args.dt);
        if args.report_every > 0 && world.tick % args.report_every == 0 {
            let s = world.summary();
            let food = s.colonies.first().map_or(0.0, |c| c.food_store);
            println!(
                "tick {:>7} | ants {:>4} (underground {:>3}) | store {:>8.2} | tunnels {:>4} | eggs {:>3}",
                s.tick, s.ants, s.underground_ants, food, s.tunnels, s.eggs
            );
        }
        if world.is_extinct() {
            println!("Every ant has died at tick {}.", world.tick);
            break;
        }
    }

    let summary = world.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = args.snapshot {
        let ants = world.ant_snapshots();
        let file = SnapshotFile {
            summary: &summary,
            ants: &ants,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}
