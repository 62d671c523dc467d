//! Arena of organisms indexed by [`OrganismId`].
//!
//! The field stores ids into this arena. Organisms that die stay in place
//! until [`Population::compact`] runs at the end of a tick, so ids remain
//! stable while a tick is in progress.

use crate::grid::Field;
use crate::organism::{Organism, OrganismId};
use crate::species::Species;

#[derive(Clone, Debug, Default)]
pub struct Population {
    organisms: Vec<Organism>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena size, including organisms that died this tick.
    #[inline]
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    #[inline]
    pub fn get(&self, id: OrganismId) -> &Organism {
        &self.organisms[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: OrganismId) -> &mut Organism {
        &mut self.organisms[id]
    }

    /// Add `organism` and record it on the field at its location.
    pub fn insert(&mut self, organism: Organism, field: &mut Field) -> OrganismId {
        let id = self.organisms.len();
        if let Some(loc) = organism.location() {
            debug_assert!(field.is_free(loc), "cell {loc} already occupied");
            field.place(id, loc);
        }
        self.organisms.push(organism);
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    /// Living organisms only
    pub fn alive(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter().filter(|o| o.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.alive().count()
    }

    /// Live members of `species`
    pub fn count_of(&self, species: Species) -> usize {
        self.alive().filter(|o| o.species() == species).count()
    }

    /// Drop dead organisms and re-index the field. Returns how many were
    /// removed. Relative order of survivors is preserved.
    pub fn compact(&mut self, field: &mut Field) -> usize {
        let before = self.organisms.len();
        self.organisms.retain(Organism::is_alive);

        field.clear_all();
        for (id, org) in self.organisms.iter().enumerate() {
            if let Some(loc) = org.location() {
                field.place(id, loc);
            }
        }
        before - self.organisms.len()
    }

    pub fn clear(&mut self) {
        self.organisms.clear();
    }
}
