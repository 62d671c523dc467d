//! Rectangular field and neighbor queries.

use crate::organism::OrganismId;
use serde::{Deserialize, Serialize};

/// A cell coordinate on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Occupancy grid of fixed depth x width.
///
/// Each cell holds at most one organism index. The field indexes organisms;
/// it does not own them.
#[derive(Clone, Debug)]
pub struct Field {
    depth: usize,
    width: usize,
    /// cells[row * width + col]
    cells: Vec<Option<OrganismId>>,
}

impl Field {
    /// Create an empty field. Both dimensions must be positive.
    pub fn new(depth: usize, width: usize) -> Self {
        assert!(depth > 0 && width > 0, "field dimensions must be positive");
        Self {
            depth,
            width,
            cells: vec![None; depth * width],
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, loc: Location) -> usize {
        assert!(self.contains(loc), "location {loc} outside field");
        loc.row * self.width + loc.col
    }

    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        loc.row < self.depth && loc.col < self.width
    }

    /// Organism at `loc`, if any.
    #[inline]
    pub fn occupant_at(&self, loc: Location) -> Option<OrganismId> {
        self.cells[self.index(loc)]
    }

    #[inline]
    pub fn is_free(&self, loc: Location) -> bool {
        self.occupant_at(loc).is_none()
    }

    /// Record `id` as the occupant of `loc`, replacing any previous occupant.
    ///
    /// Vacating the organism's old cell is the caller's job; see
    /// [`Organism::set_location`](crate::organism::Organism::set_location).
    #[inline]
    pub fn place(&mut self, id: OrganismId, loc: Location) {
        let idx = self.index(loc);
        self.cells[idx] = Some(id);
    }

    #[inline]
    pub fn clear(&mut self, loc: Location) {
        let idx = self.index(loc);
        self.cells[idx] = None;
    }

    /// Empty every cell.
    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// The 8-connected neighbors of `loc` clipped to the field.
    ///
    /// Order is fixed: rows top to bottom, columns left to right, skipping
    /// `loc` itself. Every "first matching neighbor" rule relies on it.
    pub fn neighbors(&self, loc: Location) -> Vec<Location> {
        let mut out = Vec::with_capacity(8);
        let row_min = loc.row.saturating_sub(1);
        let row_max = (loc.row + 1).min(self.depth - 1);
        let col_min = loc.col.saturating_sub(1);
        let col_max = (loc.col + 1).min(self.width - 1);

        for row in row_min..=row_max {
            for col in col_min..=col_max {
                if row != loc.row || col != loc.col {
                    out.push(Location::new(row, col));
                }
            }
        }
        out
    }

    /// Unoccupied neighbors, same order as [`Field::neighbors`].
    pub fn free_neighbors(&self, loc: Location) -> Vec<Location> {
        self.neighbors(loc)
            .into_iter()
            .filter(|&n| self.is_free(n))
            .collect()
    }

    /// First free neighbor, if any.
    pub fn free_adjacent(&self, loc: Location) -> Option<Location> {
        self.neighbors(loc).into_iter().find(|&n| self.is_free(n))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate occupied cells in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Location, OrganismId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|id| (Location::new(i / width, i % width), id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "outside field")]
    fn test_out_of_range_lookup_panics() {
        let field = Field::new(3, 3);
        field.occupant_at(Location::new(0, 3));
    }

    #[test]
    fn test_place_and_clear() {
        let mut field = Field::new(4, 5);
        let loc = Location::new(2, 3);

        assert!(field.is_free(loc));
        field.place(7, loc);
        assert_eq!(field.occupant_at(loc), Some(7));
        assert_eq!(field.occupied_count(), 1);

        field.clear(loc);
        assert_eq!(field.occupant_at(loc), None);
        assert_eq!(field.occupied_count(), 0);
    }

    #[test]
    fn test_neighbors_interior_order() {
        let field = Field::new(5, 5);
        let n = field.neighbors(Location::new(2, 2));
        assert_eq!(
            n,
            vec![
                Location::new(1, 1),
                Location::new(1, 2),
                Location::new(1, 3),
                Location::new(2, 1),
                Location::new(2, 3),
                Location::new(3, 1),
                Location::new(3, 2),
                Location::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_neighbors_clipped_at_corner() {
        let field = Field::new(5, 5);
        let n = field.neighbors(Location::new(0, 0));
        assert_eq!(
            n,
            vec![Location::new(0, 1), Location::new(1, 0), Location::new(1, 1)]
        );

        let n = field.neighbors(Location::new(4, 4));
        assert_eq!(n.len(), 3);
        assert!(n.iter().all(|&l| field.contains(l)));
    }

    #[test]
    fn test_neighbors_single_cell_field() {
        let field = Field::new(1, 1);
        assert!(field.neighbors(Location::new(0, 0)).is_empty());
        assert_eq!(field.free_adjacent(Location::new(0, 0)), None);
    }

    #[test]
    fn test_free_neighbors_and_free_adjacent() {
        let mut field = Field::new(3, 3);
        let center = Location::new(1, 1);
        field.place(0, Location::new(0, 0));
        field.place(1, Location::new(0, 1));

        let free = field.free_neighbors(center);
        assert_eq!(free.len(), 6);
        assert_eq!(free[0], Location::new(0, 2));
        assert_eq!(field.free_adjacent(center), Some(Location::new(0, 2)));
    }

    #[test]
    fn test_free_adjacent_none_when_surrounded() {
        let mut field = Field::new(1, 3);
        field.place(0, Location::new(0, 0));
        field.place(1, Location::new(0, 2));
        assert_eq!(field.free_adjacent(Location::new(0, 1)), None);
    }

    #[test]
    fn test_occupants_row_major() {
        let mut field = Field::new(2, 2);
        field.place(4, Location::new(1, 0));
        field.place(9, Location::new(0, 1));

        let all: Vec<_> = field.occupants().collect();
        assert_eq!(all, vec![(Location::new(0, 1), 9), (Location::new(1, 0), 4)]);

        field.clear_all();
        assert_eq!(field.occupants().count(), 0);
    }
}
