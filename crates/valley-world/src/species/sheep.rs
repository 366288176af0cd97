//! Sheep: herds north and south between the valley edges.
//!
//! A sheep only looks around when it turns at an edge: it refills at the
//! north edge, takes comfort (one energy) from a neighboring sheep, and dies
//! if a wolf stands next to it.

use super::Heading;
use crate::animal::Animal;
use crate::turn::Turn;
use crate::unit::Behavior;
use serde::{Deserialize, Serialize};
use tracing::trace;
use valley_core::{Color, Shape, Species};

const INITIAL_ENERGY: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheep {
    pub animal: Animal,
    heading: Heading,
}

impl Sheep {
    pub fn new() -> Self {
        Self {
            animal: Animal::new(INITIAL_ENERGY),
            heading: Heading::North,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Scan the neighborhood once: the first wolf kills, the first sheep
    /// comforts. Whichever comes first in scan order decides.
    fn check_neighbors(&mut self, turn: &mut Turn<'_>) {
        for at in turn.neighbors() {
            match turn.occupant(at).map(|unit| unit.species()) {
                Some(Species::Wolf) => {
                    trace!(row = at.row, column = at.column, "Sheep saw a wolf");
                    turn.die();
                    return;
                }
                Some(Species::Sheep) => {
                    self.animal.gain(1);
                    return;
                }
                _ => {}
            }
        }
    }
}

impl Default for Sheep {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Sheep {
    fn act(&mut self, turn: &mut Turn<'_>) {
        if self.animal.is_exhausted() {
            turn.die();
            return;
        }
        self.animal.live_day();

        let (dr, dc) = self.heading.delta();
        let next = turn.here().add(dr, dc);

        // At an edge the sheep turns around, looks around and stays put;
        // elsewhere it just steps
        if !turn.in_bounds(next) {
            if self.heading == Heading::North {
                self.animal.eat();
            }
            self.heading = self.heading.reversed();
            self.check_neighbors(turn);
            return;
        }

        turn.move_to(&mut self.animal, next);
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
