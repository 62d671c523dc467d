//! Predation - diet checks and the one-meal-per-tick food search.

use crate::grid::{Field, Location};
use crate::organism::{DeathCause, Organism, OrganismId};
use crate::population::Population;

/// Result of a food search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meal {
    /// Prey at `location` was eaten and yielded `food_value`
    Eaten { location: Location, food_value: i32 },
    /// Nothing edible next to the eater
    NoTarget,
}

/// Whether `eater` may eat `prey`: alive, not hiding, and in the eater's diet.
pub fn is_edible(eater: &Organism, prey: &Organism) -> bool {
    prey.is_alive() && !prey.is_hiding() && eater.species().can_eat(prey.species())
}

/// Eat the first edible neighbor of `eater_id`, in `neighbors` order.
///
/// The prey is killed and the eater's food level replaced by the prey's food
/// value. At most one organism is eaten.
pub fn find_food(
    eater_id: OrganismId,
    neighbors: &[Location],
    field: &mut Field,
    population: &mut Population,
) -> Meal {
    for &loc in neighbors {
        let Some(prey_id) = field.occupant_at(loc) else {
            continue;
        };
        if prey_id == eater_id || !is_edible(population.get(eater_id), population.get(prey_id)) {
            continue;
        }

        let prey = population.get_mut(prey_id);
        let food_value = prey.food_value();
        prey.set_dead(field, DeathCause::Predation);
        population.get_mut(eater_id).feed(food_value);

        return Meal::Eaten {
            location: loc,
            food_value,
        };
    }
    Meal::NoTarget
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::Sex;
    use crate::species::Species;

    fn setup(cells: &[(Species, Location)]) -> (Field, Population) {
        let mut field = Field::new(3, 3);
        let mut pop = Population::new();
        for &(species, loc) in cells {
            pop.insert(Organism::new(species, Sex::Male, 5, loc), &mut field);
        }
        (field, pop)
    }

    #[test]
    fn test_eats_first_edible_in_order() {
        let center = Location::new(1, 1);
        let (mut field, mut pop) = setup(&[
            (Species::Fox, center),
            (Species::Deer, Location::new(0, 0)),
            (Species::Rabbit, Location::new(0, 2)),
            (Species::Rat, Location::new(2, 2)),
        ]);
        let neighbors = field.neighbors(center);

        let meal = find_food(0, &neighbors, &mut field, &mut pop);
        assert_eq!(
            meal,
            Meal::Eaten {
                location: Location::new(0, 2),
                food_value: 9
            }
        );
        assert!(pop.get(1).is_alive(), "deer is not in the fox diet");
        assert!(!pop.get(2).is_alive());
        assert_eq!(pop.get(2).cause_of_death(), Some(DeathCause::Predation));
        assert!(pop.get(3).is_alive(), "only one meal per search");
        assert_eq!(pop.get(0).food_level(), 9);
        assert!(field.is_free(Location::new(0, 2)));
    }

    #[test]
    fn test_hiding_prey_skipped() {
        let center = Location::new(1, 1);
        let (mut field, mut pop) = setup(&[
            (Species::Fox, center),
            (Species::Rat, Location::new(0, 0)),
        ]);
        pop.get_mut(1).set_hiding(true);
        let neighbors = field.neighbors(center);

        assert_eq!(find_food(0, &neighbors, &mut field, &mut pop), Meal::NoTarget);
        assert!(pop.get(1).is_alive());
        assert_eq!(pop.get(0).food_level(), crate::species::INITIAL_FOOD_LEVEL);
    }

    #[test]
    fn test_grazer_eats_plant() {
        let center = Location::new(1, 1);
        let (mut field, mut pop) = setup(&[
            (Species::Deer, center),
            (Species::Plant, Location::new(2, 1)),
        ]);
        let neighbors = field.neighbors(center);

        let meal = find_food(0, &neighbors, &mut field, &mut pop);
        assert_eq!(
            meal,
            Meal::Eaten {
                location: Location::new(2, 1),
                food_value: 5
            }
        );
    }

    #[test]
    fn test_is_edible() {
        let fox = Organism::new(Species::Fox, Sex::Male, 20, Location::new(0, 0));
        let rabbit = Organism::new(Species::Rabbit, Sex::Male, 2, Location::new(0, 1));
        let plant = Organism::new(Species::Plant, Sex::Male, 2, Location::new(0, 1));
        assert!(is_edible(&fox, &rabbit));
        assert!(!is_edible(&fox, &plant));
        assert!(!is_edible(&rabbit, &fox));
        assert!(is_edible(&rabbit, &plant));
    }
}
