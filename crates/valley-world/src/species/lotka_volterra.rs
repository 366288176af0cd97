//! Lotka-Volterra predator/prey pair.
//!
//! Both species wander randomly and breed with an adjacent partner of their
//! own kind. The wolves hunt the sheep; the sheep graze on hay and die on
//! sight of a wolf. Offspring sit out their first turn so a newborn placed
//! ahead of the raster scan does not act in the tick it was born.

use crate::animal::Animal;
use crate::turn::Turn;
use crate::unit::{Behavior, Body};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use valley_core::{Color, Position, Shape, Species};

const WANDER_ATTEMPTS: usize = 5;
const WOLF_INITIAL_ENERGY: i32 = 100;
const SHEEP_INITIAL_ENERGY: i32 = 50;
/// Percentage of a sheep's energy a wolf gains by eating it
const HUNT_YIELD_PERCENT: i32 = 90;

/// Spawn an offspring in a free cell adjacent to both the acting unit and
/// its first same-species neighbor.
fn reproduce(
    turn: &mut Turn<'_>,
    species: Species,
    offspring: impl FnOnce() -> Body,
) -> Option<Position> {
    let partner = turn.find_neighbor(|unit| unit.species() == species)?;
    let nursery = turn
        .neighbors()
        .into_iter()
        .find(|pos| turn.is_empty(*pos) && pos.touches(&partner))?;

    if turn.spawn(nursery, offspring()) {
        debug!(
            %species,
            row = nursery.row,
            column = nursery.column,
            "Pair-model offspring born"
        );
        Some(nursery)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfLotVol {
    pub animal: Animal,
    skip_turn: bool,
}

impl WolfLotVol {
    pub fn new() -> Self {
        Self {
            animal: Animal::new(WOLF_INITIAL_ENERGY),
            skip_turn: false,
        }
    }

    /// A wolf that will sit out its first turn
    pub fn newborn() -> Self {
        Self {
            skip_turn: true,
            ..Self::new()
        }
    }

    pub fn skips_next_turn(&self) -> bool {
        self.skip_turn
    }

    pub(crate) fn wake(&mut self) {
        self.skip_turn = false;
    }

    fn hunt(&mut self, turn: &mut Turn<'_>) -> bool {
        let Some(at) = turn.find_neighbor(|unit| unit.species() == Species::SheepLotVol) else {
            return false;
        };
        let Some(prey) = turn.kill(at) else {
            return false;
        };

        let gained = prey.energy().unwrap_or(0) * HUNT_YIELD_PERCENT / 100;
        self.animal.gain(gained);
        trace!(row = at.row, column = at.column, gained, "Pair-model wolf hunted");
        true
    }
}

impl Default for WolfLotVol {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for WolfLotVol {
    fn act(&mut self, turn: &mut Turn<'_>) {
        if self.skip_turn {
            self.skip_turn = false;
            return;
        }
        if self.animal.is_exhausted() {
            turn.die();
            return;
        }
        self.animal.live_day();

        // A successful hunt is the whole turn
        if self.hunt(turn) {
            return;
        }
        reproduce(turn, Species::WolfLotVol, || {
            Body::WolfLotVol(WolfLotVol::newborn())
        });
        turn.wander(&mut self.animal, WANDER_ATTEMPTS);
    }

    fn shape(&self) -> Shape {
        Shape::Round
    }

    fn color(&self) -> Color {
        Color::BLACK
    }

    fn animal(&self) -> Option<&Animal> {
        Some(&self.animal)
    }

    fn animal_mut(&mut self) -> Option<&mut Animal> {
        Some(&mut self.animal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheepLotVol {
    pub animal: Animal,
    skip_turn: bool,
}

impl SheepLotVol {
    pub fn new() -> Self {
        Self {
            animal: Animal::new(SHEEP_INITIAL_ENERGY),
            skip_turn: false,
        }
    }

    /// A sheep that will sit out its first turn
    pub fn newborn() -> Self {
        Self {
            skip_turn: true,
            ..Self::new()
        }
    }

    pub fn skips_next_turn(&self) -> bool {
        self.skip_turn
    }

    pub(crate) fn wake(&mut self) {
        self.skip_turn = false;
    }

    /// Nibble the first adjacent hay: a tenth of current energy, at least one.
    /// The hay itself is not used up.
    fn graze(&mut self, turn: &Turn<'_>) -> bool {
        if turn
            .find_neighbor(|unit| unit.species() == Species::Hay)
            .is_none()
        {
            return false;
        }
        let gained = (self.animal.energy() / 10).max(1);
        self.animal.gain(gained);
        true
    }
}

impl Default for SheepLotVol {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for SheepLotVol {
    fn act(&mut self, turn: &mut Turn<'_>) {
        if self.skip_turn {
            self.skip_turn = false;
            return;
        }
        if self.animal.is_exhausted() {
            turn.die();
            return;
        }
        self.animal.live_day();

        if turn
            .find_neighbor(|unit| unit.species() == Species::WolfLotVol)
            .is_some()
        {
            turn.die();
            return;
        }

        self.graze(turn);
        reproduce(turn, Species::SheepLotVol, || {
            Body::SheepLotVol(SheepLotVol::newborn())
        });
        turn.wander(&mut self.animal, WANDER_ATTEMPTS);
    }

    fn shape(&self) -> Shape {
        Shape::Square
    }

    fn color(&self) -> Color {
        Color::LIGHT_GRAY
    }

    fn animal(&self) -> Option<&Animal> {
        Some(&self.animal)
    }

    fn animal_mut(&mut self) -> Option<&mut Animal> {
        Some(&mut self.animal)
    }
}
