//! Statistics tracking for the simulation.

use crate::population::Population;
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics snapshot for a simulation step
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation step
    pub step: u64,
    /// Total live organisms
    pub population: usize,
    /// Live organisms per species (species with none are omitted)
    pub counts: BTreeMap<Species, usize>,
    /// Live infected organisms
    pub infected: usize,
    /// Births this step
    pub births: usize,
    /// Deaths this step
    pub deaths: usize,
    pub night: bool,
    pub raining: bool,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Recount from the current population
    pub fn update(&mut self, population: &Population) {
        self.counts.clear();
        self.population = 0;
        self.infected = 0;

        for org in population.alive() {
            *self.counts.entry(org.species()).or_insert(0) += 1;
            self.population += 1;
            if org.is_infected() {
                self.infected += 1;
            }
        }
    }

    /// Live count for one species
    pub fn count(&self, species: Species) -> usize {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    /// Number of species with at least one live member
    pub fn species_alive(&self) -> usize {
        self.counts.values().filter(|&&n| n > 0).count()
    }

    /// A run stays viable while more than one species survives.
    pub fn is_viable(&self) -> bool {
        self.species_alive() > 1
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Step:{:6} | Pop:{:5} | Inf:{:4} | +{:<3} -{:<3} | {}{}",
            self.step,
            self.population,
            self.infected,
            self.births,
            self.deaths,
            if self.night { "night" } else { "day" },
            if self.raining { ", rain" } else { "" },
        );
        for (species, n) in &self.counts {
            line.push_str(&format!(" | {}:{}", species, n));
        }
        line
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Whether a snapshot is due at `step`
    pub fn is_due(&self, step: u64) -> bool {
        step % self.interval == 0
    }

    /// Live count of `species` over time
    pub fn population_series(&self, species: Species) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.step, s.count(species)))
            .collect()
    }

    /// Total population over time
    pub fn total_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.step, s.population))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Field, Location};
    use crate::organism::{DeathCause, Organism, Sex};

    #[test]
    fn test_stats_update() {
        let mut field = Field::new(2, 2);
        let mut pop = Population::new();
        pop.insert(Organism::new(Species::Fox, Sex::Male, 1, Location::new(0, 0)), &mut field);
        pop.insert(Organism::new(Species::Fox, Sex::Female, 1, Location::new(0, 1)), &mut field);
        let rat = pop.insert(Organism::new(Species::Rat, Sex::Male, 1, Location::new(1, 0)), &mut field);
        let plant = pop.insert(Organism::new(Species::Plant, Sex::Male, 1, Location::new(1, 1)), &mut field);
        pop.get_mut(rat).set_infected(true);
        pop.get_mut(plant).set_dead(&mut field, DeathCause::OldAge);

        let mut stats = Stats::new();
        stats.update(&pop);

        assert_eq!(stats.population, 3);
        assert_eq!(stats.count(Species::Fox), 2);
        assert_eq!(stats.count(Species::Plant), 0);
        assert_eq!(stats.infected, 1);
        assert_eq!(stats.species_alive(), 2);
        assert!(stats.is_viable());
    }

    #[test]
    fn test_single_species_not_viable() {
        let mut stats = Stats::new();
        stats.counts.insert(Species::Plant, 40);
        assert!(!stats.is_viable());
        stats.counts.clear();
        assert!(!stats.is_viable());
    }

    #[test]
    fn test_stats_history() {
        let mut history = StatsHistory::new(10);

        for i in 0..5u64 {
            let mut stats = Stats::new();
            stats.step = i * 10;
            stats.population = (i + 1) as usize * 100;
            stats.counts.insert(Species::Deer, i as usize);
            history.record(stats);
        }

        let series = history.total_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (0, 100));
        assert_eq!(series[4], (40, 500));
        assert_eq!(history.population_series(Species::Deer)[3], (30, 3));
        assert_eq!(history.population_series(Species::Fox)[3], (30, 0));
        assert!(history.is_due(20));
        assert!(!history.is_due(21));
    }

    #[test]
    fn test_summary_mentions_species() {
        let mut stats = Stats::new();
        stats.step = 12;
        stats.counts.insert(Species::Tiger, 3);
        let line = stats.summary();
        assert!(line.contains("Tiger:3"));
        assert!(line.contains("day"));
    }
}
