//! Disease transmission between adjacent organisms.

use crate::grid::{Field, Location};
use crate::population::Population;
use crate::random::RandomSource;
use crate::species::Species;
use serde::{Deserialize, Serialize};

/// Infection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfectionConfig {
    /// Is transmission enabled
    pub enabled: bool,
    /// Baseline multiplier when source and target share a species
    pub same_species_multiplier: f64,
}

impl Default for InfectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            same_species_multiplier: 3.0,
        }
    }
}

/// Spreads infection from one organism to its neighbors.
#[derive(Debug, Clone)]
pub struct Infector {
    enabled: bool,
    same_species_multiplier: f64,
}

impl Infector {
    pub fn new(config: &InfectionConfig) -> Self {
        Self {
            enabled: config.enabled,
            same_species_multiplier: config.same_species_multiplier,
        }
    }

    /// Expose each neighbor of an infected `source` species.
    ///
    /// One draw per occupied neighbor decides both rules: same-species
    /// targets are infected when the draw is within the multiplied baseline,
    /// any target when it is within its own baseline. The scan stops at the
    /// first empty neighbor cell. Returns the number of newly infected.
    pub fn infect<R: RandomSource + ?Sized>(
        &self,
        source: Species,
        neighbors: &[Location],
        field: &Field,
        population: &mut Population,
        rng: &mut R,
    ) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut newly_infected = 0;
        for &loc in neighbors {
            let Some(id) = field.occupant_at(loc) else {
                return newly_infected;
            };
            let target = population.get_mut(id);
            let draw = rng.next_f64();
            let baseline = target.infection_probability();

            let same_species = target.species() == source
                && draw <= self.same_species_multiplier * baseline;
            let cross_species = draw <= baseline;

            if (same_species || cross_species) && !target.is_infected() {
                target.set_infected(true);
                newly_infected += 1;
            }
        }
        newly_infected
    }
}

impl Default for Infector {
    fn default() -> Self {
        Self::new(&InfectionConfig::default())
    }
}
