//! Wolf: a random walker that starves when its energy runs out.

use crate::animal::Animal;
use crate::turn::Turn;
use crate::unit::Behavior;
use serde::{Deserialize, Serialize};
use valley_core::{Color, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wolf {
    pub animal: Animal,
}

impl Wolf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for Wolf {
    fn act(&mut self, turn: &mut Turn<'_>) {
        if self.animal.energy() == 0 {
            turn.die();
            return;
        }
        self.animal.live_day();

        // One retry when the first random step is blocked
        if !turn.random_step(&mut self.animal) {
            turn.random_step(&mut self.animal);
        }
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
