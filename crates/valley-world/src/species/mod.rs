//! Per-species behavior rules.

pub mod fox;
pub mod grass;
pub mod hay;
pub mod lotka_volterra;
pub mod sheep;
pub mod wolf;

pub use fox::Fox;
pub use grass::{Grass, GrowthStage};
pub use hay::Hay;
pub use lotka_volterra::{SheepLotVol, WolfLotVol};
pub use sheep::Sheep;
pub use wolf::Wolf;

use serde::{Deserialize, Serialize};

/// Direction of travel for the sweeping species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// (row, column) delta of one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::North => (-1, 0),
            Heading::South => (1, 0),
            Heading::East => (0, 1),
            Heading::West => (0, -1),
        }
    }

    pub fn reversed(&self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }
}
