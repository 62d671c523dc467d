//! Per-tick behavior for each species category.
//!
//! Every function here runs one organism's turn against the shared field
//! and population. Newborns are appended to the population arena, which the
//! simulator does not visit until the next tick.

use crate::ecology::{find_food, Infector, Meal};
use crate::grid::{Field, Location};
use crate::organism::{DeathCause, Organism, OrganismId};
use crate::population::Population;
use crate::random::RandomSource;
use crate::species::Behavior;

/// What happened during one organism's turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub births: usize,
    pub newly_infected: usize,
    /// Location of the prey eaten this turn
    pub meal: Option<Location>,
    pub moved_to: Option<Location>,
}

/// Run the turn of organism `id`, dispatching on its species category.
///
/// Dead organisms are skipped.
pub fn act<R: RandomSource + ?Sized>(
    id: OrganismId,
    field: &mut Field,
    population: &mut Population,
    infector: &Infector,
    rng: &mut R,
) -> TurnReport {
    if !population.get(id).is_alive() {
        return TurnReport::default();
    }
    match population.get(id).species().behavior() {
        Behavior::Producer => producer_turn(id, field, population, rng),
        Behavior::DayGrazer => eater_turn(id, true, field, population, infector, rng),
        Behavior::Predator => eater_turn(id, false, field, population, infector, rng),
        Behavior::Burrower => burrower_turn(id, field, population, infector, rng),
    }
}

/// Infected organisms age twice.
fn age_step(org: &mut Organism, field: &mut Field) {
    if org.is_infected() {
        org.age_tick(field);
    }
    org.age_tick(field);
}

/// Breed if a mate is among `neighbors`; newborns go into free cells around
/// the parent. Returns the litter size actually placed.
fn breed<R: RandomSource + ?Sized>(
    id: OrganismId,
    neighbors: &[Location],
    field: &mut Field,
    population: &mut Population,
    rng: &mut R,
) -> usize {
    let parent = population.get(id);
    let Some(home) = parent.location() else {
        return 0;
    };
    let has_mate = neighbors
        .iter()
        .filter_map(|&loc| field.occupant_at(loc))
        .any(|other| parent.is_mate(population.get(other)));
    if !has_mate {
        return 0;
    }

    let species = parent.species();
    let free = field.free_neighbors(home);
    let litter = parent.attempt_breed(&free, rng, |loc, r| Organism::newborn(species, loc, r));

    let born = litter.len();
    for child in litter {
        population.insert(child, field);
    }
    born
}

/// Move to the first free neighbor, or die of overcrowding.
fn move_or_die(
    id: OrganismId,
    home: Location,
    field: &mut Field,
    population: &mut Population,
) -> Option<Location> {
    let org = population.get_mut(id);
    match field.free_adjacent(home) {
        Some(next) => {
            org.set_location(id, next, field);
            Some(next)
        }
        None => {
            org.set_dead(field, DeathCause::Overcrowding);
            None
        }
    }
}

/// Producers never move or eat, and only age while it rains.
pub fn producer_turn<R: RandomSource + ?Sized>(
    id: OrganismId,
    field: &mut Field,
    population: &mut Population,
    rng: &mut R,
) -> TurnReport {
    let mut report = TurnReport::default();
    let org = population.get_mut(id);
    if org.is_raining() {
        age_step(org, field);
    }
    let Some(home) = org.location() else {
        return report;
    };

    let neighbors = field.neighbors(home);
    report.births = breed(id, &neighbors, field, population, rng);
    report
}

/// Grazers and predators: age, hunger, breed, spread infection, eat, move.
///
/// A meal and a move are mutually exclusive in one turn; only an unfed
/// eater looks for a free cell, and dies of overcrowding if there is none.
/// Day-restricted eaters skip the movement phase entirely at night.
pub fn eater_turn<R: RandomSource + ?Sized>(
    id: OrganismId,
    day_restricted: bool,
    field: &mut Field,
    population: &mut Population,
    infector: &Infector,
    rng: &mut R,
) -> TurnReport {
    let mut report = TurnReport::default();
    let org = population.get_mut(id);
    age_step(org, field);
    org.hunger_tick(field);
    let Some(home) = org.location() else {
        return report;
    };
    let species = org.species();

    let neighbors = field.neighbors(home);
    report.births = breed(id, &neighbors, field, population, rng);

    if population.get(id).is_infected() {
        report.newly_infected = infector.infect(species, &neighbors, field, population, rng);
    }

    if let Meal::Eaten { location, .. } = find_food(id, &neighbors, field, population) {
        report.meal = Some(location);
    }

    if day_restricted && population.get(id).is_night() {
        return report;
    }
    if report.meal.is_none() {
        report.moved_to = move_or_die(id, home, field, population);
    }
    report
}

/// Burrowers never eat; they hide in place while it rains.
pub fn burrower_turn<R: RandomSource + ?Sized>(
    id: OrganismId,
    field: &mut Field,
    population: &mut Population,
    infector: &Infector,
    rng: &mut R,
) -> TurnReport {
    let mut report = TurnReport::default();
    let org = population.get_mut(id);
    age_step(org, field);
    let raining = org.is_raining();
    org.set_hiding(raining);
    let Some(home) = org.location() else {
        return report;
    };
    let species = org.species();

    let neighbors = field.neighbors(home);
    report.births = breed(id, &neighbors, field, population, rng);

    if population.get(id).is_infected() {
        report.newly_infected = infector.infect(species, &neighbors, field, population, rng);
    }

    if !population.get(id).is_hiding() {
        report.moved_to = move_or_die(id, home, field, population);
    }
    report
}
