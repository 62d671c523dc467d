//! Organism lifecycle shared by every species.
//!
//! An organism ages, may starve, breeds into free neighbor cells and can be
//! infected. Species-specific rules live in [`crate::behavior`].

use crate::grid::{Field, Location};
use crate::random::RandomSource;
use crate::species::{Species, SpeciesTraits, INITIAL_FOOD_LEVEL};
use serde::{Deserialize, Serialize};

/// Index of an organism in the [`Population`](crate::population::Population)
/// arena.
pub type OrganismId = usize;

/// Biological sex for mating compatibility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Fair coin from the injected source
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        if rng.next_bool() {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// Cause of death tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Overcrowding,
    Predation,
}

/// A single organism on the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Organism {
    species: Species,
    sex: Sex,
    age: u32,
    /// Steps left before starvation; only meaningful for eaters
    food_level: i32,
    alive: bool,
    location: Option<Location>,

    infected: bool,
    hiding: bool,

    // Environment inputs, pushed in by the simulator every tick
    night: bool,
    raining: bool,

    cause_of_death: Option<DeathCause>,
}

impl Organism {
    /// Create an organism destined for `location`.
    ///
    /// It is not on the field until inserted into a population.
    pub fn new(species: Species, sex: Sex, age: u32, location: Location) -> Self {
        Self {
            species,
            sex,
            age,
            food_level: INITIAL_FOOD_LEVEL,
            alive: true,
            location: Some(location),
            infected: false,
            hiding: false,
            night: false,
            raining: false,
            cause_of_death: None,
        }
    }

    /// Age-zero organism with a random sex, as produced by breeding.
    pub fn newborn<R: RandomSource + ?Sized>(
        species: Species,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let sex = Sex::random(rng);
        Self::new(species, sex, 0, location).with_carrier_draw(rng)
    }

    /// Organism of random age in `[0, max_age)`, used when seeding a field.
    pub fn seeded<R: RandomSource + ?Sized>(
        species: Species,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let sex = Sex::random(rng);
        let age = rng.next_below(species.traits().max_age);
        Self::new(species, sex, age, location).with_carrier_draw(rng)
    }

    fn with_carrier_draw<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.species.is_carrier() {
            self.infected = rng.chance(self.infection_probability());
        }
        self
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    #[inline]
    pub fn traits(&self) -> &'static SpeciesTraits {
        self.species.traits()
    }

    #[inline]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[inline]
    pub fn food_level(&self) -> i32 {
        self.food_level
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current cell; `None` once dead.
    #[inline]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn cause_of_death(&self) -> Option<DeathCause> {
        self.cause_of_death
    }

    #[inline]
    pub fn is_infected(&self) -> bool {
        self.infected
    }

    #[inline]
    pub fn is_hiding(&self) -> bool {
        self.hiding
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.night
    }

    #[inline]
    pub fn is_raining(&self) -> bool {
        self.raining
    }

    pub fn set_night(&mut self, night: bool) {
        self.night = night;
    }

    pub fn set_rain(&mut self, raining: bool) {
        self.raining = raining;
    }

    pub fn set_hiding(&mut self, hiding: bool) {
        self.hiding = hiding;
    }

    pub fn set_infected(&mut self, infected: bool) {
        self.infected = infected;
    }

    /// Food level a predator gains by eating this organism.
    #[inline]
    pub fn food_value(&self) -> i32 {
        self.traits().food_value
    }

    #[inline]
    pub fn infection_probability(&self) -> f64 {
        self.traits().infection_probability
    }

    /// Whether `other` is a mating partner: same species, opposite sex, alive.
    pub fn is_mate(&self, other: &Organism) -> bool {
        other.alive && other.species == self.species && other.sex != self.sex
    }

    /// Move to `loc`, vacating the previous cell.
    pub fn set_location(&mut self, id: OrganismId, loc: Location, field: &mut Field) {
        if let Some(old) = self.location.take() {
            field.clear(old);
        }
        field.place(id, loc);
        self.location = Some(loc);
    }

    /// Mark dead and vacate the cell. Later calls are no-ops.
    pub fn set_dead(&mut self, field: &mut Field, cause: DeathCause) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.cause_of_death = Some(cause);
        if let Some(loc) = self.location.take() {
            field.clear(loc);
        }
    }

    /// One aging step; dies of old age once past the species maximum.
    pub fn age_tick(&mut self, field: &mut Field) {
        if !self.alive {
            return;
        }
        self.age += 1;
        if self.age > self.traits().max_age {
            self.set_dead(field, DeathCause::OldAge);
        }
    }

    /// One hunger step; dies when the food level reaches zero.
    pub fn hunger_tick(&mut self, field: &mut Field) {
        if !self.alive {
            return;
        }
        self.food_level -= 1;
        if self.food_level <= 0 {
            self.set_dead(field, DeathCause::Starvation);
        }
    }

    /// Replace the food level after a meal.
    pub fn feed(&mut self, food_value: i32) {
        self.food_level = food_value;
    }

    #[inline]
    pub fn can_breed(&self) -> bool {
        self.age >= self.traits().breeding_age
    }

    /// Roll for a litter and create one newborn per free location.
    ///
    /// One draw decides whether breeding happens; a second picks the litter
    /// size from `1..=max_litter_size`. Newborns beyond the available free
    /// locations are discarded. The caller places the returned organisms.
    pub fn attempt_breed<R, F>(&self, free: &[Location], rng: &mut R, mut create: F) -> Vec<Organism>
    where
        R: RandomSource + ?Sized,
        F: FnMut(Location, &mut R) -> Organism,
    {
        if !self.alive || !self.can_breed() {
            return Vec::new();
        }
        let traits = self.traits();
        if !rng.chance(traits.breeding_probability) {
            return Vec::new();
        }
        let litter = rng.next_below(traits.max_litter_size) as usize + 1;

        free.iter()
            .take(litter)
            .map(|&loc| create(loc, &mut *rng))
            .collect()
    }
}
