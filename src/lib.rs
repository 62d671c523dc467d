//! # HABITAT
//!
//! Grid-based multi-species ecosystem simulator.
//!
//! ## Features
//!
//! - **Species**: plants, day-active grazers, predators and burrowing carriers
//! - **Environment**: day/night cycle and stochastic rain spells
//! - **Infection**: contact-based disease that doubles aging
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: every random draw goes through an injected source
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use habitat::{Config, Simulator};
//!
//! // Create a seeded field with the default config
//! let config = Config::default();
//! let mut sim = Simulator::new_with_seed(config, 42);
//!
//! // Run until a single species is left, at most 1000 steps
//! let steps = sim.run_while_viable(1000);
//!
//! println!("Ran {} steps", steps);
//! println!("{}", sim.stats.summary());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use habitat::Config;
//! use habitat::config::SeedRule;
//! use habitat::Species;
//!
//! let mut config = Config::default();
//! config.world.depth = 40;
//! config.weather.day_length = 10;
//! config.population.seeding.push(SeedRule { species: Species::Rat, probability: 0.05 });
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Scripted randomness
//!
//! ```rust
//! use habitat::random::ScriptedRandom;
//! use habitat::config::PopulationConfig;
//! use habitat::organism::Sex;
//! use habitat::{Config, Location, Simulator, Species};
//!
//! let mut config = Config::default();
//! config.world.depth = 1;
//! config.world.width = 3;
//! config.population = PopulationConfig::empty();
//!
//! let mut sim = Simulator::bare(config, ScriptedRandom::repeating(0.0));
//! sim.spawn(Species::Plant, Sex::Male, 10, Location::new(0, 0));
//! sim.spawn(Species::Plant, Sex::Female, 10, Location::new(0, 1));
//! sim.step();
//! assert_eq!(sim.population(), 3);
//! ```

pub mod behavior;
pub mod config;
pub mod ecology;
pub mod grid;
pub mod organism;
pub mod population;
pub mod random;
pub mod simulator;
pub mod species;
pub mod stats;

// Re-export main types
pub use config::{Config, ConfigError};
pub use grid::{Field, Location};
pub use organism::{DeathCause, Organism, OrganismId, Sex};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use simulator::Simulator;
pub use species::{Behavior, Species};
pub use stats::{Stats, StatsHistory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick headless benchmark on the default field
pub fn benchmark(steps: u64, seed: u64) -> BenchmarkResult {
    use std::time::Instant;

    let mut sim = Simulator::new_with_seed(Config::default(), seed);
    let initial_population = sim.population();

    let start = Instant::now();
    sim.run(steps);
    let elapsed = start.elapsed();

    BenchmarkResult {
        steps,
        initial_population,
        final_population: sim.population(),
        species_alive: sim.stats.species_alive(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub species_alive: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Population: {} -> {}", self.initial_population, self.final_population)?;
        writeln!(f, "Species alive: {}", self.species_alive)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut config = Config::default();
        config.world.depth = 20;
        config.world.width = 20;
        let mut sim = Simulator::new_with_seed(config, 1);

        sim.run(100);

        assert_eq!(sim.step, 100);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(20, 3);

        assert_eq!(result.steps, 20);
        assert!(result.initial_population > 0);
        assert!(result.steps_per_second > 0.0);
    }
}
