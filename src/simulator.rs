//! Simulation stepper - owns the field, the population and the clocks.

use crate::behavior;
use crate::config::Config;
use crate::ecology::{Infector, Weather};
use crate::grid::{Field, Location};
use crate::organism::{Organism, OrganismId, Sex};
use crate::population::Population;
use crate::random::{RandomSource, SeededRandom};
use crate::species::Species;
use crate::stats::{Stats, StatsHistory};

/// The simulation world
pub struct Simulator<R: RandomSource = SeededRandom> {
    // Population
    field: Field,
    population: Population,

    // State
    pub step: u64,
    pub weather: Weather,

    // Configuration
    pub config: Config,
    infector: Infector,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    rng: R,
}

impl Simulator<SeededRandom> {
    /// Create a seeded-at-random simulation with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_random(config, SeededRandom::from_entropy())
    }

    /// Create a simulation with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        Self::with_random(config, SeededRandom::new(seed))
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> Simulator<R> {
    /// Build the field and seed it from `config.population`.
    pub fn with_random(config: Config, rng: R) -> Self {
        let mut sim = Self::bare(config, rng);
        sim.seed_population();
        sim
    }

    /// Build an empty field. Organisms can be added with [`Simulator::spawn`].
    pub fn bare(config: Config, mut rng: R) -> Self {
        let (depth, width) = config.world.dimensions();
        let weather = Weather::new(&config.weather, &mut rng);

        let mut sim = Self {
            field: Field::new(depth, width),
            population: Population::new(),
            step: 0,
            weather,
            infector: Infector::new(&config.infection),
            stats: Stats::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            config,
            rng,
        };
        sim.update_stats(0, 0);
        sim
    }

    /// Clear the field and reseed it; the step counter and the weather
    /// start over.
    pub fn reset(&mut self) {
        self.step = 0;
        self.weather = Weather::new(&self.config.weather, &mut self.rng);
        self.seed_population();
    }

    fn seed_population(&mut self) {
        self.population.clear();
        self.field.clear_all();
        self.stats_history = StatsHistory::new(self.config.logging.stats_interval);
        self.populate();
        self.update_stats(0, 0);

        log::info!(
            "Field {}x{} seeded with {} organisms",
            self.field.depth(),
            self.field.width(),
            self.population.len()
        );
    }

    /// Walk the field row by row; per cell, the first seeding rule whose
    /// draw succeeds claims it.
    fn populate(&mut self) {
        let rules = self.config.population.seeding.clone();
        for row in 0..self.field.depth() {
            for col in 0..self.field.width() {
                let loc = Location::new(row, col);
                for rule in &rules {
                    if self.rng.chance(rule.probability) {
                        let org = Organism::seeded(rule.species, loc, &mut self.rng);
                        self.population.insert(org, &mut self.field);
                        break;
                    }
                }
            }
        }
    }

    /// Place a new organism at `loc`. Returns `None` if the cell is taken
    /// or lies outside the field.
    pub fn spawn(&mut self, species: Species, sex: Sex, age: u32, loc: Location) -> Option<OrganismId> {
        if !self.field.contains(loc) || !self.field.is_free(loc) {
            return None;
        }
        let id = self
            .population
            .insert(Organism::new(species, sex, age, loc), &mut self.field);
        self.stats.update(&self.population);
        Some(id)
    }

    /// Main simulation step
    pub fn step(&mut self) {
        self.step += 1;

        // Phase 1: Environment clocks
        self.weather.advance(self.step, &mut self.rng);
        let night = self.weather.is_night();
        let raining = self.weather.is_raining();

        // Phase 2: Every organism alive at tick start acts once, in order.
        // Newborns land past `snapshot` and wait for the next tick.
        let snapshot = self.population.len();
        let mut births = 0;
        for id in 0..snapshot {
            let org = self.population.get_mut(id);
            if !org.is_alive() {
                continue;
            }
            org.set_night(night);
            org.set_rain(raining);

            let report = behavior::act(
                id,
                &mut self.field,
                &mut self.population,
                &self.infector,
                &mut self.rng,
            );
            births += report.births;
        }

        // Phase 3: Remove the dead
        let deaths = self.population.compact(&mut self.field);

        // Phase 4: Statistics
        self.update_stats(births, deaths);
        log::debug!(
            "step {}: {} births, {} deaths, {} alive ({})",
            self.step,
            births,
            deaths,
            self.stats.population,
            self.weather.describe()
        );
    }

    fn update_stats(&mut self, births: usize, deaths: usize) {
        self.stats.step = self.step;
        self.stats.births = births;
        self.stats.deaths = deaths;
        self.stats.night = self.weather.is_night();
        self.stats.raining = self.weather.is_raining();
        self.stats.update(&self.population);

        if self.step > 0 && self.stats_history.is_due(self.step) {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run simulation for specified number of steps
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Run up to `steps` steps, stopping early once the run is no longer
    /// viable. Returns the number of steps taken.
    pub fn run_while_viable(&mut self, steps: u64) -> u64 {
        let mut taken = 0;
        while taken < steps && self.is_viable() {
            self.step();
            taken += 1;
        }
        taken
    }

    /// Get current population count
    pub fn population(&self) -> usize {
        self.population.live_count()
    }

    /// Check if population is extinct
    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    /// More than one species still alive
    pub fn is_viable(&self) -> bool {
        self.stats.is_viable()
    }

    pub fn is_night(&self) -> bool {
        self.weather.is_night()
    }

    pub fn is_raining(&self) -> bool {
        self.weather.is_raining()
    }

    /// Read-only field access for viewers
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Live organisms in population order
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.population.alive()
    }

    pub fn organism_at(&self, loc: Location) -> Option<&Organism> {
        self.field
            .occupant_at(loc)
            .map(|id| self.population.get(id))
    }

    /// Row-major species raster, `None` for empty cells.
    pub fn occupancy(&self) -> Vec<Option<Species>> {
        let mut raster = vec![None; self.field.cell_count()];
        let width = self.field.width();
        for (loc, id) in self.field.occupants() {
            raster[loc.row * width + loc.col] = Some(self.population.get(id).species());
        }
        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PopulationConfig, WorldConfig};
    use crate::random::ScriptedRandom;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.world = WorldConfig { depth: 30, width: 40 };
        config
    }

    fn empty_config(depth: usize, width: usize) -> Config {
        let mut config = Config::default();
        config.world = WorldConfig { depth, width };
        config.population = PopulationConfig::empty();
        config
    }

    #[test]
    fn test_simulator_creation() {
        let sim = Simulator::new_with_seed(test_config(), 42);

        assert_eq!(sim.step, 0);
        assert!(sim.population() > 0);
        assert_eq!(sim.population(), sim.field().occupied_count());
        assert_eq!(sim.seed(), 42);
    }

    #[test]
    fn test_zero_dimensions_use_defaults() {
        let sim = Simulator::bare(empty_config(0, 0), ScriptedRandom::repeating(0.5));
        assert_eq!(sim.field().depth(), WorldConfig::DEFAULT_DEPTH);
        assert_eq!(sim.field().width(), WorldConfig::DEFAULT_WIDTH);
    }

    #[test]
    fn test_seeding_first_rule_wins() {
        let mut config = empty_config(2, 3);
        config.population.seeding = vec![
            crate::config::SeedRule { species: Species::Fox, probability: 1.0 },
            crate::config::SeedRule { species: Species::Plant, probability: 1.0 },
        ];
        let sim = Simulator::with_random(config, ScriptedRandom::repeating(0.5));

        assert_eq!(sim.population(), 6);
        assert!(sim.occupancy().iter().all(|c| *c == Some(Species::Fox)));
    }

    #[test]
    fn test_seeding_zero_probability_leaves_empty() {
        let mut config = empty_config(4, 4);
        config.population.seeding = vec![crate::config::SeedRule {
            species: Species::Deer,
            probability: 0.0,
        }];
        let sim = Simulator::with_random(config, ScriptedRandom::repeating(0.5));
        assert!(sim.is_extinct());
    }

    #[test]
    fn test_step_counter_and_night() {
        let mut sim = Simulator::bare(empty_config(3, 3), ScriptedRandom::repeating(0.99));
        sim.run(19);
        assert!(!sim.is_night());
        sim.step();
        assert_eq!(sim.step, 20);
        assert!(sim.is_night());
        sim.run(20);
        assert!(!sim.is_night());
    }

    #[test]
    fn test_spawn_rejects_occupied_cell() {
        let mut sim = Simulator::bare(empty_config(2, 2), ScriptedRandom::repeating(0.5));
        let loc = Location::new(1, 1);
        assert!(sim.spawn(Species::Fox, Sex::Male, 1, loc).is_some());
        assert!(sim.spawn(Species::Rat, Sex::Male, 1, loc).is_none());
        assert_eq!(sim.organism_at(loc).map(|o| o.species()), Some(Species::Fox));
        assert_eq!(sim.stats.count(Species::Fox), 1);
    }

    #[test]
    fn test_spawn_rejects_location_outside_field() {
        let mut sim = Simulator::bare(empty_config(3, 3), ScriptedRandom::repeating(0.5));
        assert!(sim.spawn(Species::Fox, Sex::Male, 1, Location::new(0, 3)).is_none());
        assert!(sim.spawn(Species::Fox, Sex::Male, 1, Location::new(3, 0)).is_none());
        assert!(sim.is_extinct());
        assert_eq!(sim.field().occupied_count(), 0);
    }

    #[test]
    fn test_seeding_keeps_initial_dry_spell() {
        // first draw sets a one step dry spell; a redraw would read 0.99
        let rng = ScriptedRandom::from_sequence(vec![0.0, 0.99]);
        let sim = Simulator::with_random(empty_config(2, 2), rng);
        assert_eq!(sim.weather.rain_timer, 1);
    }

    #[test]
    fn test_newborns_do_not_act_in_birth_tick() {
        let mut sim = Simulator::bare(empty_config(1, 3), ScriptedRandom::repeating(0.0));
        sim.spawn(Species::Plant, Sex::Male, 10, Location::new(0, 0));
        sim.spawn(Species::Plant, Sex::Female, 10, Location::new(0, 1));

        sim.step();
        let newborn = sim.organism_at(Location::new(0, 2)).expect("newborn placed");
        assert_eq!(newborn.age(), 0);
        assert_eq!(sim.population(), 3);
        assert_eq!(sim.stats.births, 1);
    }

    #[test]
    fn test_world_run_invariants() {
        let mut sim = Simulator::new_with_seed(test_config(), 7);
        for _ in 0..100 {
            sim.step();
            assert_eq!(sim.population(), sim.field().occupied_count());
            assert!(sim.population() <= sim.field().cell_count());
            for org in sim.organisms() {
                let loc = org.location().expect("live organisms are placed");
                assert!(std::ptr::eq(sim.organism_at(loc).unwrap(), org));
            }
        }
        assert_eq!(sim.step, 100);
    }

    #[test]
    fn test_reproducibility() {
        let mut a = Simulator::new_with_seed(test_config(), 99);
        let mut b = Simulator::new_with_seed(test_config(), 99);
        a.run(50);
        b.run(50);
        assert_eq!(a.population(), b.population());
        assert_eq!(a.occupancy(), b.occupancy());
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulator::new_with_seed(test_config(), 5);
        sim.run(30);
        sim.reset();
        assert_eq!(sim.step, 0);
        assert_eq!(sim.population(), sim.field().occupied_count());
        assert!(sim.stats_history.snapshots.is_empty());
    }

    #[test]
    fn test_stats_history_recorded() {
        let mut config = test_config();
        config.logging.stats_interval = 10;
        let mut sim = Simulator::new_with_seed(config, 11);
        sim.run(50);
        assert_eq!(sim.stats_history.snapshots.len(), 5);
        assert_eq!(sim.stats_history.snapshots[0].step, 10);
    }
}
