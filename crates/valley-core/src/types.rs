//! Core type definitions for the valley.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the valley grid.
///
/// Signed so neighbor arithmetic can step past an edge; bounds are
/// checked by the grid, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    pub fn add(&self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            column: self.column + dc,
        }
    }

    /// Chebyshev distance: the number of king moves between two cells
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.column - other.column).abs())
    }

    /// True if `other` lies in this cell's Moore neighborhood (or is this cell)
    pub fn touches(&self, other: &Position) -> bool {
        self.chebyshev_distance(other) <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Moore neighborhood offsets in scan order. The first match in this order
/// wins every "nearest neighbor" rule.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Display shape of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Round,
    Square,
}

/// RGB display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const FOREST_GREEN: Color = Color::rgb(34, 139, 34);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const SIENNA: Color = Color::rgb(160, 82, 45);
}

/// Every kind of unit that can live in the valley
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Wolf,
    Sheep,
    Fox,
    WolfLotVol,
    SheepLotVol,
    Grass,
    Hay,
}

impl Species {
    pub fn all() -> [Species; 7] {
        [
            Species::Wolf,
            Species::Sheep,
            Species::Fox,
            Species::WolfLotVol,
            Species::SheepLotVol,
            Species::Grass,
            Species::Hay,
        ]
    }

    /// Name used by the text exchange format
    pub fn name(&self) -> &'static str {
        match self {
            Species::Wolf => "Wolf",
            Species::Sheep => "Sheep",
            Species::Fox => "Fox",
            Species::WolfLotVol => "WolfLotVol",
            Species::SheepLotVol => "SheepLotVol",
            Species::Grass => "Grass",
            Species::Hay => "Hay",
        }
    }

    pub fn is_animal(&self) -> bool {
        !self.is_resource()
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Species::Grass | Species::Hay)
    }

    /// Single glyph for text maps
    pub fn glyph(&self) -> char {
        match self {
            Species::Wolf => 'W',
            Species::Sheep => 'S',
            Species::Fox => 'F',
            Species::WolfLotVol => 'w',
            Species::SheepLotVol => 's',
            Species::Grass => 'g',
            Species::Hay => 'h',
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
