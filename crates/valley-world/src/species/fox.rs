//! Fox: sweeps east and west along its row, eating sheep it passes.

use super::Heading;
use crate::animal::Animal;
use crate::turn::Turn;
use crate::unit::Behavior;
use serde::{Deserialize, Serialize};
use tracing::debug;
use valley_core::{Color, Shape, Species};

const INITIAL_ENERGY: i32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fox {
    pub animal: Animal,
    heading: Heading,
}

impl Fox {
    pub fn new() -> Self {
        Self {
            animal: Animal::new(INITIAL_ENERGY),
            heading: Heading::East,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Eat the first adjacent sheep, gaining half of its energy
    fn hunt(&mut self, turn: &mut Turn<'_>) -> bool {
        let Some(at) = turn.find_neighbor(|unit| unit.species() == Species::Sheep) else {
            return false;
        };
        let Some(prey) = turn.kill(at) else {
            return false;
        };

        let gained = prey.energy().unwrap_or(0) / 2;
        self.animal.gain(gained);
        debug!(
            row = at.row,
            column = at.column,
            gained,
            energy = self.animal.energy(),
            "Fox ate a sheep"
        );
        true
    }

    /// Step along the heading; at the edge, turn around instead of moving
    fn patrol(&mut self, turn: &mut Turn<'_>) {
        let (dr, dc) = self.heading.delta();
        let next = turn.here().add(dr, dc);
        if !turn.in_bounds(next) {
            self.heading = self.heading.reversed();
            return;
        }
        turn.move_to(&mut self.animal, next);
    }
}

impl Default for Fox {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Fox {
    fn act(&mut self, turn: &mut Turn<'_>) {
        if self.animal.is_exhausted() {
            turn.die();
            return;
        }
        self.animal.live_day();

        self.hunt(turn);
        self.patrol(turn);
    }

    fn shape(&self) -> Shape {
        Shape::Round
    }

    fn color(&self) -> Color {
        Color::ORANGE
    }

    fn animal(&self) -> Option<&Animal> {
        Some(&self.animal)
    }

    fn animal_mut(&mut self) -> Option<&mut Animal> {
        Some(&mut self.animal)
    }
}
