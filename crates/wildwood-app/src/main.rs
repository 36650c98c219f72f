use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use wildwood_app::{PathingChoice, run_headless};

#[derive(Parser, Debug)]
#[command(
    name = "wildwood",
    version,
    about = "Run a Wildwood world headlessly and print the survivor log"
)]
struct Cli {
    /// Path to a world description file.
    #[arg(required_unless_present = "string")]
    world: Option<PathBuf>,

    /// Inline world description used instead of a file.
    #[arg(long, conflicts_with = "world")]
    string: Option<String>,

    /// Simulated seconds to run before logging.
    #[arg(long, default_value_t = 100.0)]
    lifetime: f64,

    /// Seed for the simulation's random draws; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Pathing strategy for movers (a-star or single-step).
    #[arg(long, default_value = "a-star")]
    pathing: PathingChoice,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = if let Some(inline) = cli.string {
        inline
    } else if let Some(path) = &cli.world {
        fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?
    } else {
        bail!("either a world file or --string is required");
    };

    for line in run_headless(&source, cli.lifetime, cli.seed, cli.pathing)? {
        println!("{line}");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
