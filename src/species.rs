//! Species table: behavior category, life-history constants and diet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral category layered over the shared organism lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Stationary, never eats, ages only while it rains.
    Producer,
    /// Eats producers; stays put at night.
    DayGrazer,
    /// Eats grazers and burrowers, day and night.
    Predator,
    /// Never eats; hides from rain and carries infection from birth.
    Burrower,
}

/// Closed set of species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Plant,
    Rabbit,
    Deer,
    Capybara,
    Rat,
    Fox,
    Tiger,
    Leopard,
}

/// Per-species constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesTraits {
    pub behavior: Behavior,
    /// Minimum age before breeding is attempted
    pub breeding_age: u32,
    /// Organism dies once its age exceeds this
    pub max_age: u32,
    /// Probability of a breeding event per eligible tick
    pub breeding_probability: f64,
    /// Litter size is drawn from 1..=max_litter_size
    pub max_litter_size: u32,
    /// Food level a predator gains by eating this species
    pub food_value: i32,
    /// Baseline used by the infection rule
    pub infection_probability: f64,
    /// Edible species; empty for non-eaters
    pub diet: &'static [Species],
}

/// Food level an eater starts its life with.
pub const INITIAL_FOOD_LEVEL: i32 = 15;

const PLANT: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::Producer,
    breeding_age: 5,
    max_age: 15,
    breeding_probability: 0.10,
    max_litter_size: 8,
    food_value: 5,
    infection_probability: 0.03,
    diet: &[],
};

const RABBIT: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::DayGrazer,
    breeding_age: 7,
    max_age: 20,
    breeding_probability: 0.10,
    max_litter_size: 4,
    food_value: 9,
    infection_probability: 0.02,
    diet: &[Species::Plant],
};

const DEER: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::DayGrazer,
    breeding_age: 10,
    max_age: 20,
    breeding_probability: 0.09,
    max_litter_size: 4,
    food_value: 18,
    infection_probability: 0.02,
    diet: &[Species::Plant],
};

const CAPYBARA: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::DayGrazer,
    breeding_age: 7,
    max_age: 20,
    breeding_probability: 0.10,
    max_litter_size: 4,
    food_value: 9,
    infection_probability: 0.02,
    diet: &[Species::Plant],
};

const RAT: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::Burrower,
    breeding_age: 2,
    max_age: 5,
    breeding_probability: 0.11,
    max_litter_size: 4,
    food_value: 2,
    infection_probability: 0.05,
    diet: &[],
};

const FOX: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::Predator,
    breeding_age: 15,
    max_age: 50,
    breeding_probability: 0.10,
    max_litter_size: 3,
    food_value: 0,
    infection_probability: 0.01,
    diet: &[Species::Rabbit, Species::Rat],
};

const TIGER: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::Predator,
    breeding_age: 15,
    max_age: 50,
    breeding_probability: 0.10,
    max_litter_size: 2,
    food_value: 0,
    infection_probability: 0.01,
    diet: &[Species::Deer],
};

const LEOPARD: SpeciesTraits = SpeciesTraits {
    behavior: Behavior::Predator,
    breeding_age: 15,
    max_age: 50,
    breeding_probability: 0.10,
    max_litter_size: 3,
    food_value: 0,
    infection_probability: 0.01,
    diet: &[Species::Capybara, Species::Rat],
};

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Plant,
        Species::Rabbit,
        Species::Deer,
        Species::Capybara,
        Species::Rat,
        Species::Fox,
        Species::Tiger,
        Species::Leopard,
    ];

    #[inline]
    pub fn traits(self) -> &'static SpeciesTraits {
        match self {
            Species::Plant => &PLANT,
            Species::Rabbit => &RABBIT,
            Species::Deer => &DEER,
            Species::Capybara => &CAPYBARA,
            Species::Rat => &RAT,
            Species::Fox => &FOX,
            Species::Tiger => &TIGER,
            Species::Leopard => &LEOPARD,
        }
    }

    #[inline]
    pub fn behavior(self) -> Behavior {
        self.traits().behavior
    }

    /// Diet lookup keyed by the (eater, prey) pair.
    #[inline]
    pub fn can_eat(self, prey: Species) -> bool {
        self.traits().diet.contains(&prey)
    }

    /// Whether this species tracks a food level and can starve.
    pub fn is_eater(self) -> bool {
        matches!(self.behavior(), Behavior::DayGrazer | Behavior::Predator)
    }

    /// Burrowers are born infected with their baseline probability.
    pub fn is_carrier(self) -> bool {
        self.behavior() == Behavior::Burrower
    }

    /// Position in [`Species::ALL`], handy for per-species counters.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Plant => "Plant",
            Species::Rabbit => "Rabbit",
            Species::Deer => "Deer",
            Species::Capybara => "Capybara",
            Species::Rat => "Rat",
            Species::Fox => "Fox",
            Species::Tiger => "Tiger",
            Species::Leopard => "Leopard",
        }
    }

    /// Single-character glyph for text rasters, used by the CLI report and
    /// external viewers.
    pub fn glyph(self) -> char {
        match self {
            Species::Plant => '*',
            Species::Rabbit => 'r',
            Species::Deer => 'd',
            Species::Capybara => 'c',
            Species::Rat => '.',
            Species::Fox => 'F',
            Species::Tiger => 'T',
            Species::Leopard => 'L',
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
