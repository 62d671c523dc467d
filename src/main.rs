//! HABITAT - CLI Entry Point
//!
//! Headless driver for the ecosystem simulator.

use clap::{Parser, Subcommand};
use habitat::{benchmark, Config, Simulator};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "habitat")]
#[command(version)]
#[command(about = "Grid-based multi-species ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Maximum number of steps to simulate
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,

        /// Write the stats history as JSON
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of steps
        #[arg(short, long, default_value = "500")]
        steps: u64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            quiet,
            stats,
        } => run_simulation(config, steps, seed, quiet, stats),

        Commands::Benchmark { steps, seed } => {
            init_logging("info");
            run_benchmark(steps, seed)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_simulation(
    config_path: PathBuf,
    steps: u64,
    seed: Option<u64>,
    quiet: bool,
    stats_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let (config, source) = if config_path.exists() {
        (Config::from_file(&config_path)?, format!("{:?}", config_path))
    } else {
        (Config::default(), "defaults".to_string())
    };

    let level = if quiet { "warn" } else { config.logging.log_level.as_str() };
    init_logging(level);
    log::info!("Configuration: {}", source);

    let mut sim = match seed {
        Some(s) => Simulator::new_with_seed(config.clone(), s),
        None => Simulator::new(config.clone()),
    };

    log::info!("Seed: {}", sim.seed());
    log::info!(
        "Field {}x{}, {} organisms, up to {} steps",
        sim.field().depth(),
        sim.field().width(),
        sim.population(),
        steps
    );

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval.max(1);

    while sim.step < steps {
        if !sim.is_viable() {
            log::info!("Only {} species left at step {}", sim.stats.species_alive(), sim.step);
            break;
        }
        sim.step();

        if sim.step % stats_interval == 0 {
            log::info!("{}", sim.stats.summary());
        }
    }

    let elapsed = start.elapsed();
    let steps_per_sec = sim.step as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Steps: {}", sim.step);
    println!("Speed: {:.1} steps/s", steps_per_sec);
    println!("Final population: {}", sim.population());
    for (species, count) in &sim.stats.counts {
        println!("  {} {:<9} {}", species.glyph(), species.name(), count);
    }
    println!("Infected: {}", sim.stats.infected);

    if let Some(path) = stats_path {
        sim.stats_history.save(&path.to_string_lossy())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(steps: u64, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== HABITAT Benchmark ===");
    println!("Steps: {}", steps);
    println!("Seed: {}", seed);
    println!();

    let result = benchmark(steps, seed);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
