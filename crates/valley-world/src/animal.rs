//! Energy-bearing base shared by every animal species.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::trace;
use valley_core::Position;

pub const MAX_ENERGY: i32 = 100;

/// Energy and age counters composed into each animal species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    energy: i32,
    days: u64,
}

impl Animal {
    pub fn new(energy: i32) -> Self {
        Self {
            energy: energy.clamp(0, MAX_ENERGY),
            days: 0,
        }
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    /// Number of behavior steps this animal has taken
    pub fn days(&self) -> u64 {
        self.days
    }

    pub fn set_energy(&mut self, energy: i32) {
        self.energy = energy.clamp(0, MAX_ENERGY);
    }

    /// Spend one unit of energy. Fails, leaving energy untouched, when empty.
    pub fn step(&mut self) -> bool {
        if self.energy >= 1 {
            self.energy -= 1;
            true
        } else {
            false
        }
    }

    /// Restore energy to full
    pub fn eat(&mut self) {
        self.energy = MAX_ENERGY;
    }

    pub fn gain(&mut self, amount: i32) {
        self.set_energy(self.energy.saturating_add(amount));
    }

    pub fn is_exhausted(&self) -> bool {
        self.energy <= 0
    }

    pub(crate) fn live_day(&mut self) {
        self.days += 1;
    }

    pub(crate) fn is_valid(&self) -> bool {
        (0..=MAX_ENERGY).contains(&self.energy)
    }
}

impl Default for Animal {
    fn default() -> Self {
        Self::new(MAX_ENERGY)
    }
}

impl Grid {
    /// Move the animal at `from` to `to`.
    ///
    /// Fails without side effects if `to` is out of bounds or occupied, or if
    /// `from` holds no animal. An animal with no energy left to pay for the
    /// move dies in place.
    pub fn move_animal(&mut self, from: Position, to: Position) -> bool {
        if !self.is_empty(to) {
            return false;
        }
        let Some(animal) = self.get_mut(from).and_then(|unit| unit.body.animal_mut()) else {
            return false;
        };

        if !animal.step() {
            trace!(row = from.row, column = from.column, "Animal starved while moving");
            self.remove(from);
            return false;
        }

        let unit = self.remove(from);
        self.place(to, unit).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Fox, Hay, Wolf};
    use crate::unit::Body;
    use proptest::prelude::*;

    #[test]
    fn test_animal_creation() {
        let animal = Animal::default();
        assert_eq!(animal.energy(), 100);
        assert_eq!(animal.days(), 0);

        assert_eq!(Animal::new(250).energy(), 100);
        assert_eq!(Animal::new(-4).energy(), 0);
    }

    #[test]
    fn test_step_at_zero_energy() {
        let mut animal = Animal::new(1);
        assert!(animal.step());
        assert_eq!(animal.energy(), 0);

        assert!(!animal.step());
        assert_eq!(animal.energy(), 0);
        assert!(animal.is_exhausted());
    }

    #[test]
    fn test_eat_and_gain() {
        let mut animal = Animal::new(5);
        animal.gain(10);
        assert_eq!(animal.energy(), 15);
        animal.gain(500);
        assert_eq!(animal.energy(), 100);

        animal.set_energy(3);
        animal.eat();
        assert_eq!(animal.energy(), 100);
    }

    #[test]
    fn test_move_animal() {
        let mut grid = Grid::new(10);
        let from = Position::new(5, 5);
        let to = Position::new(5, 6);
        let id = grid.insert(from, Body::Wolf(Wolf::new())).unwrap();

        assert!(grid.move_animal(from, to));

        assert!(grid.is_empty(from));
        let unit = grid.get(to).unwrap();
        assert_eq!(unit.id, id);
        assert_eq!(unit.position, to);
        assert_eq!(unit.energy(), Some(99));
    }

    #[test]
    fn test_move_animal_rejections() {
        let mut grid = Grid::new(10);
        let from = Position::new(0, 0);
        grid.insert(from, Body::Fox(Fox::new())).unwrap();
        grid.insert(Position::new(0, 1), Body::Hay(Hay::new())).unwrap();

        // Occupied, out of bounds, and onto itself
        assert!(!grid.move_animal(from, Position::new(0, 1)));
        assert!(!grid.move_animal(from, Position::new(-1, 0)));
        assert!(!grid.move_animal(from, from));
        assert_eq!(grid.get(from).unwrap().energy(), Some(60));

        // Resources cannot move
        assert!(!grid.move_animal(Position::new(0, 1), Position::new(1, 1)));
        assert!(!grid.move_animal(Position::new(4, 4), Position::new(4, 5)));
    }

    #[test]
    fn test_move_without_energy_kills() {
        let mut grid = Grid::new(10);
        let from = Position::new(2, 2);
        let mut wolf = Wolf::new();
        wolf.animal.set_energy(0);
        grid.insert(from, Body::Wolf(wolf)).unwrap();

        assert!(!grid.move_animal(from, Position::new(2, 3)));
        assert!(grid.is_empty(from));
        assert!(grid.is_empty(Position::new(2, 3)));
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_range(start in -50i32..200, gains in prop::collection::vec(-20i32..60, 0..20), steps in 0usize..150) {
            let mut animal = Animal::new(start);
            for gain in gains {
                animal.gain(gain);
                prop_assert!((0..=MAX_ENERGY).contains(&animal.energy()));
            }
            for _ in 0..steps {
                let before = animal.energy();
                let stepped = animal.step();
                prop_assert_eq!(stepped, before >= 1);
                prop_assert!(animal.energy() >= 0);
            }
        }

        #[test]
        fn prop_successful_move_costs_one(row in 0i32..10, column in 0i32..10, dr in -1i32..=1, dc in -1i32..=1, energy in 0i32..=100) {
            let mut grid = Grid::new(10);
            let from = Position::new(row, column);
            let to = from.add(dr, dc);
            let mut wolf = Wolf::new();
            wolf.animal.set_energy(energy);
            grid.insert(from, Body::Wolf(wolf)).unwrap();

            if grid.move_animal(from, to) {
                prop_assert!(grid.is_empty(from));
                let unit = grid.get(to).unwrap();
                prop_assert_eq!(unit.position, to);
                prop_assert_eq!(unit.energy(), Some(energy - 1));
                prop_assert_eq!(grid.population(), 1);
            } else if energy == 0 && grid.in_bounds(to) && to != from {
                prop_assert_eq!(grid.population(), 0);
            } else {
                prop_assert_eq!(grid.get(from).unwrap().energy(), Some(energy));
            }
        }
    }
}
