#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wander::{PlotLayout, StatsReport};
use wander_core::{WalkGenerator, WalkParameters, random_seed};

#[derive(Parser, Debug)]
#[command(
    name = "wander",
    about = "Simulate and plot lattice random walks",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Number of dimensions (1, 2 or 3)
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
    dimensions: u8,

    /// Number of steps (>0)
    #[arg(short = 'n', long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    steps: u64,

    /// Seed for a reproducible walk; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the statistics without opening a plot window
    #[arg(long)]
    no_plot: bool,

    /// Plot window width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Plot window height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let params = WalkParameters::new(
        usize::try_from(cli.steps).context("step count does not fit in memory")?,
        usize::from(cli.dimensions),
    );
    let seed = cli.seed.unwrap_or_else(random_seed);
    info!(
        seed,
        steps = params.num_steps,
        dimensions = params.dimensions,
        "simulating walk"
    );

    let walk = WalkGenerator::seeded(seed)
        .run(params)
        .context("simulating walk")?;
    println!("{}", StatsReport(&walk.stats));

    if cli.no_plot {
        return Ok(());
    }

    let layout = PlotLayout::new().with_size(cli.width, cli.height);
    wander::plot_walk(&walk.path, layout).context("displaying plot")?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
