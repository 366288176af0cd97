//! Dense square grid holding at most one unit per cell.

use crate::unit::{Body, Unit, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use valley_core::{Error, Position, Result, MOORE_OFFSETS};

/// A bounded N x N grid, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    cells: Vec<Option<Unit>>,
    next_id: u64,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        let side = size.max(0) as usize;
        Self {
            size,
            cells: (0..side * side).map(|_| None).collect(),
            next_id: 0,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.row) && (0..self.size).contains(&pos.column)
    }

    /// Occupant of a cell, or `OutOfBounds` for coordinates outside the grid
    pub fn occupant_at(&self, pos: Position) -> Result<Option<&Unit>> {
        match self.index(pos) {
            Some(index) => Ok(self.cells[index].as_ref()),
            None => Err(self.out_of_bounds(pos)),
        }
    }

    /// Occupant of a cell; `None` when empty or out of bounds
    pub fn get(&self, pos: Position) -> Option<&Unit> {
        self.index(pos).and_then(|index| self.cells[index].as_ref())
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Unit> {
        let index = self.index(pos)?;
        self.cells[index].as_mut()
    }

    /// True iff the cell is inside the grid and vacant
    pub fn is_empty(&self, pos: Position) -> bool {
        self.index(pos)
            .map(|index| self.cells[index].is_none())
            .unwrap_or(false)
    }

    /// Overwrite a cell unconditionally, returning whatever was there.
    /// A placed unit has its recorded position rewritten to the cell.
    pub fn place(&mut self, pos: Position, unit: Option<Unit>) -> Result<Option<Unit>> {
        let index = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        let unit = unit.map(|mut unit| {
            unit.position = pos;
            unit
        });
        Ok(std::mem::replace(&mut self.cells[index], unit))
    }

    /// Create a new unit in an empty cell
    pub fn insert(&mut self, pos: Position, body: Body) -> Result<UnitId> {
        let index = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        if self.cells[index].is_some() {
            return Err(Error::OccupiedCell {
                row: pos.row,
                column: pos.column,
            });
        }

        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.cells[index] = Some(Unit::new(id, pos, body));
        Ok(id)
    }

    /// Clear a cell, returning its former occupant
    pub fn remove(&mut self, pos: Position) -> Option<Unit> {
        self.index(pos).and_then(|index| self.cells[index].take())
    }

    /// In-bounds Moore neighbors of `pos`, in scan order
    pub fn moore(&self, pos: Position) -> Vec<Position> {
        MOORE_OFFSETS
            .iter()
            .map(|&(dr, dc)| pos.add(dr, dc))
            .filter(|neighbor| self.in_bounds(*neighbor))
            .collect()
    }

    /// Number of Moore neighbors holding the same species as the unit at `pos`
    pub fn count_matching_neighbors(&self, pos: Position) -> usize {
        let Some(species) = self.get(pos).map(Unit::species) else {
            return 0;
        };

        self.moore(pos)
            .into_iter()
            .filter(|neighbor| {
                self.get(*neighbor)
                    .map_or(false, |unit| unit.species() == species)
            })
            .count()
    }

    /// Occupied cells in row-major order
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.cells.iter().flatten()
    }

    pub(crate) fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> + '_ {
        self.cells.iter_mut().flatten()
    }

    pub fn population(&self) -> usize {
        self.units().count()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Position from a row-major cell index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let row = (index as i32) / self.size;
        let column = (index as i32) % self.size;
        Position::new(row, column)
    }

    /// Check the structural invariants of a grid that came from outside
    /// (a decoded snapshot): square storage, positions matching cells,
    /// unique ids below the allocator, energies in range.
    pub fn validate(&self) -> Result<()> {
        let corrupt = |reason: String| Err(Error::PersistenceCorrupt(reason));

        if self.size < 1 {
            return corrupt(format!("grid size {} is not positive", self.size));
        }
        let side = self.size as usize;
        if self.cells.len() != side * side {
            return corrupt(format!(
                "grid of size {} holds {} cells",
                self.size,
                self.cells.len()
            ));
        }

        let mut seen = HashSet::new();
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(unit) = cell else { continue };
            let expected = self.index_to_pos(index);
            if unit.position != expected {
                return corrupt(format!(
                    "unit {} records position {} but sits at {}",
                    unit.id.0, unit.position, expected
                ));
            }
            if unit.id.0 >= self.next_id || !seen.insert(unit.id) {
                return corrupt(format!("unit id {} is duplicated or unallocated", unit.id.0));
            }
            if let Some(animal) = unit.animal() {
                if !animal.is_valid() {
                    return corrupt(format!(
                        "{} at {} has energy {}",
                        unit.species(),
                        expected,
                        animal.energy()
                    ));
                }
            }
        }

        Ok(())
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.row * self.size + pos.column) as usize)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, pos: Position) -> Error {
        Error::OutOfBounds {
            row: pos.row,
            column: pos.column,
            size: self.size,
        }
    }
}
