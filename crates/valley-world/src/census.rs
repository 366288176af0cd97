//! Per-species population counts.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use valley_core::Species;

/// Population of every species at one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub tick: u64,
    pub counts: BTreeMap<Species, usize>,
}

impl Census {
    /// Count the grid's occupants. Every species gets an entry, zero included.
    pub fn take(grid: &Grid, tick: u64) -> Self {
        let mut counts: BTreeMap<Species, usize> =
            Species::all().into_iter().map(|species| (species, 0)).collect();
        for unit in grid.units() {
            *counts.entry(unit.species()).or_insert(0) += 1;
        }
        Self { tick, counts }
    }

    pub fn count(&self, species: Species) -> usize {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn animals(&self) -> usize {
        self.counts
            .iter()
            .filter(|(species, _)| species.is_animal())
            .map(|(_, count)| count)
            .sum()
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (species, count) in &self.counts {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", species, count)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Grass, Hay, Sheep, Wolf};
    use crate::unit::Body;
    use valley_core::Position;

    #[test]
    fn test_census_counts() {
        let mut grid = Grid::new(6);
        grid.insert(Position::new(0, 0), Body::Wolf(Wolf::new())).unwrap();
        grid.insert(Position::new(1, 0), Body::Wolf(Wolf::new())).unwrap();
        grid.insert(Position::new(2, 0), Body::Sheep(Sheep::new())).unwrap();
        grid.insert(Position::new(3, 0), Body::Hay(Hay::new())).unwrap();
        grid.insert(Position::new(4, 0), Body::Grass(Grass::new())).unwrap();

        let census = Census::take(&grid, 7);
        assert_eq!(census.tick, 7);
        assert_eq!(census.count(Species::Wolf), 2);
        assert_eq!(census.count(Species::Fox), 0);
        assert_eq!(census.total(), 5);
        assert_eq!(census.animals(), 3);
        assert_eq!(census.counts.len(), 7);
    }

    #[test]
    fn test_census_display() {
        let census = Census::take(&Grid::new(2), 0);
        assert_eq!(
            census.to_string(),
            "Wolf=0 Sheep=0 Fox=0 WolfLotVol=0 SheepLotVol=0 Grass=0 Hay=0"
        );
    }

    #[test]
    fn test_census_json_uses_species_names() {
        let mut grid = Grid::new(3);
        grid.insert(Position::new(1, 1), Body::Sheep(Sheep::new())).unwrap();

        let json = serde_json::to_value(Census::take(&grid, 2)).unwrap();
        assert_eq!(json["tick"], 2);
        assert_eq!(json["counts"]["Sheep"], 1);
        assert_eq!(json["counts"]["Hay"], 0);
    }
}
