use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use terminal_life::{Overrides, Settings, Simulation, TerminalSurface};

/// Conway's Game of Life on a wrap-around grid, animated in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "Path to a terminal_life.toml settings file.")]
    config: Option<PathBuf>,

    #[arg(long, help = "Grid width in cells.")]
    width: Option<usize>,

    #[arg(long, help = "Grid height in cells.")]
    height: Option<usize>,

    #[arg(long, help = "Probability that a cell starts alive, within [0, 1].")]
    density: Option<f64>,

    #[arg(long, help = "Pause between frames in milliseconds.")]
    interval_ms: Option<u64>,

    #[arg(short, long, help = "Stop after this many generations instead of running forever.")]
    generations: Option<u64>,

    #[arg(long, help = "Seed for the initial grid, for reproducible runs.")]
    seed: Option<u64>,

    #[arg(long, help = "Dump configuration and then exit with success return code.")]
    dump_config: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            density: self.density,
            interval_ms: self.interval_ms,
            max_generations: self.generations,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, frames to stdout.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let file_settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let settings = file_settings.with_overrides(args.overrides());
    settings.validate().context("invalid settings")?;

    if args.dump_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let simulation = Simulation::seeded(&settings, &mut rng)?;

    let mut surface = TerminalSurface::stdout();
    let summary = simulation.run(&mut surface, thread::sleep)?;

    info!(
        "stopped after {} generations with {} alive",
        summary.generations, summary.population
    );
    Ok(())
}
