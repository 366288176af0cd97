//! The view of the valley a unit gets while it acts.

use crate::animal::Animal;
use crate::grid::Grid;
use crate::unit::{Body, Unit};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use valley_core::Position;

/// One unit's behavior step.
///
/// The acting unit has been lifted out of the grid; its cell counts as
/// occupied for every query made through the turn. When the step ends the
/// tick driver writes the unit back at [`Turn::here`] unless it died.
pub struct Turn<'a> {
    grid: &'a mut Grid,
    rng: &'a mut ChaCha8Rng,
    here: Position,
    alive: bool,
}

impl<'a> Turn<'a> {
    pub(crate) fn new(grid: &'a mut Grid, rng: &'a mut ChaCha8Rng, here: Position) -> Self {
        Self {
            grid,
            rng,
            here,
            alive: true,
        }
    }

    /// Where the acting unit currently stands
    pub fn here(&self) -> Position {
        self.here
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.grid.in_bounds(pos)
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        pos != self.here && self.grid.is_empty(pos)
    }

    pub fn occupant(&self, pos: Position) -> Option<&Unit> {
        self.grid.get(pos)
    }

    /// In-bounds Moore neighbors of the acting unit, in scan order
    pub fn neighbors(&self) -> Vec<Position> {
        self.grid.moore(self.here)
    }

    /// First neighbor, in scan order, whose occupant satisfies `pred`
    pub fn find_neighbor(&self, pred: impl Fn(&Unit) -> bool) -> Option<Position> {
        self.neighbors()
            .into_iter()
            .find(|pos| self.grid.get(*pos).map_or(false, &pred))
    }

    /// Remove another unit from the grid
    pub fn kill(&mut self, pos: Position) -> Option<Unit> {
        if pos == self.here {
            return None;
        }
        let victim = self.grid.remove(pos)?;
        trace!(
            species = %victim.species(),
            row = pos.row,
            column = pos.column,
            "Unit killed"
        );
        Some(victim)
    }

    /// Create a new unit in an empty cell
    pub fn spawn(&mut self, pos: Position, body: Body) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        let species = body.species();
        match self.grid.insert(pos, body) {
            Ok(id) => {
                trace!(%species, %id, row = pos.row, column = pos.column, "Unit born");
                true
            }
            Err(_) => false,
        }
    }

    /// The acting unit dies; it is not written back to the grid
    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Move the acting animal one cell.
    ///
    /// Fails without side effects if the target is out of bounds or occupied.
    /// If the animal cannot pay the move's energy it dies and the move fails.
    pub fn move_to(&mut self, animal: &mut Animal, to: Position) -> bool {
        if !self.alive || !self.is_empty(to) {
            return false;
        }
        if !animal.step() {
            self.die();
            return false;
        }
        self.here = to;
        true
    }

    /// Offset drawn uniformly from {-1, 0, 1} x {-1, 0, 1}
    pub fn random_offset(&mut self) -> (i32, i32) {
        (self.rng.gen_range(-1..=1), self.rng.gen_range(-1..=1))
    }

    /// One attempt to move by a random offset
    pub fn random_step(&mut self, animal: &mut Animal) -> bool {
        let (dr, dc) = self.random_offset();
        let to = self.here.add(dr, dc);
        self.move_to(animal, to)
    }

    /// Up to `attempts` random steps, stopping at the first success or death
    pub fn wander(&mut self, animal: &mut Animal, attempts: usize) -> bool {
        for _ in 0..attempts {
            if !self.alive {
                return false;
            }
            if self.random_step(animal) {
                return true;
            }
        }
        false
    }
}
