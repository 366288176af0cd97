//! Units: anything that can occupy a cell.

use crate::animal::Animal;
use crate::species::{Fox, Grass, Hay, Sheep, SheepLotVol, Wolf, WolfLotVol};
use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use std::fmt;
use valley_core::{Color, Position, Shape, Species};

/// Grid-unique identifier for a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-species rules for one behavior step.
///
/// `act` runs with the unit lifted out of its cell; the [`Turn`] gives it the
/// rest of the grid and reports where the unit ends up (or that it died).
pub trait Behavior {
    fn act(&mut self, turn: &mut Turn<'_>);

    fn shape(&self) -> Shape {
        Shape::Square
    }

    fn color(&self) -> Color {
        Color::BLACK
    }

    fn animal(&self) -> Option<&Animal> {
        None
    }

    fn animal_mut(&mut self) -> Option<&mut Animal> {
        None
    }
}

/// Species-specific state of a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Wolf(Wolf),
    Sheep(Sheep),
    Fox(Fox),
    WolfLotVol(WolfLotVol),
    SheepLotVol(SheepLotVol),
    Grass(Grass),
    Hay(Hay),
}

impl Body {
    /// Freshly constructed state for a species
    pub fn default_for(species: Species) -> Self {
        match species {
            Species::Wolf => Body::Wolf(Wolf::new()),
            Species::Sheep => Body::Sheep(Sheep::new()),
            Species::Fox => Body::Fox(Fox::new()),
            Species::WolfLotVol => Body::WolfLotVol(WolfLotVol::new()),
            Species::SheepLotVol => Body::SheepLotVol(SheepLotVol::new()),
            Species::Grass => Body::Grass(Grass::new()),
            Species::Hay => Body::Hay(Hay::new()),
        }
    }

    pub fn species(&self) -> Species {
        match self {
            Body::Wolf(_) => Species::Wolf,
            Body::Sheep(_) => Species::Sheep,
            Body::Fox(_) => Species::Fox,
            Body::WolfLotVol(_) => Species::WolfLotVol,
            Body::SheepLotVol(_) => Species::SheepLotVol,
            Body::Grass(_) => Species::Grass,
            Body::Hay(_) => Species::Hay,
        }
    }

    pub fn behavior(&self) -> &dyn Behavior {
        match self {
            Body::Wolf(b) => b,
            Body::Sheep(b) => b,
            Body::Fox(b) => b,
            Body::WolfLotVol(b) => b,
            Body::SheepLotVol(b) => b,
            Body::Grass(b) => b,
            Body::Hay(b) => b,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Body::Wolf(b) => b,
            Body::Sheep(b) => b,
            Body::Fox(b) => b,
            Body::WolfLotVol(b) => b,
            Body::SheepLotVol(b) => b,
            Body::Grass(b) => b,
            Body::Hay(b) => b,
        }
    }

    /// Clear a pending skip-first-turn flag
    pub(crate) fn wake(&mut self) {
        match self {
            Body::WolfLotVol(wolf) => wolf.wake(),
            Body::SheepLotVol(sheep) => sheep.wake(),
            _ => {}
        }
    }

    pub fn animal(&self) -> Option<&Animal> {
        self.behavior().animal()
    }

    pub fn animal_mut(&mut self) -> Option<&mut Animal> {
        self.behavior_mut().animal_mut()
    }
}

/// A unit placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub position: Position,
    pub body: Body,
}

impl Unit {
    pub fn new(id: UnitId, position: Position, body: Body) -> Self {
        Self { id, position, body }
    }

    pub fn species(&self) -> Species {
        self.body.species()
    }

    pub fn is_animal(&self) -> bool {
        self.body.animal().is_some()
    }

    pub fn is_resource(&self) -> bool {
        self.species().is_resource()
    }

    pub fn animal(&self) -> Option<&Animal> {
        self.body.animal()
    }

    pub fn energy(&self) -> Option<i32> {
        self.animal().map(Animal::energy)
    }

    pub fn shape(&self) -> Shape {
        self.body.behavior().shape()
    }

    pub fn color(&self) -> Color {
        self.body.behavior().color()
    }

    /// What a renderer needs to draw this cell
    pub fn view(&self) -> CellView {
        CellView {
            position: self.position,
            species: self.species(),
            shape: self.shape(),
            color: self.color(),
            is_animal: self.is_animal(),
            energy: self.energy(),
        }
    }
}

/// Read-only description of an occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub position: Position,
    pub species: Species,
    pub shape: Shape,
    pub color: Color,
    pub is_animal: bool,
    pub energy: Option<i32>,
}
