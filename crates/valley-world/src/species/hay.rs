//! Hay: an immobile bale whose colour flips every tick.

use crate::turn::Turn;
use crate::unit::Behavior;
use serde::{Deserialize, Serialize};
use valley_core::Color;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hay {
    steps: u64,
}

impl Hay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tick(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }
}

impl Behavior for Hay {
    fn act(&mut self, _turn: &mut Turn<'_>) {
        self.tick();
    }

    fn color(&self) -> Color {
        if self.steps % 2 == 0 {
            Color::YELLOW
        } else {
            Color::RED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valley_core::Shape;

    #[test]
    fn test_colour_alternates() {
        let mut hay = Hay::new();
        assert_eq!(hay.color(), Color::YELLOW);
        assert_eq!(hay.shape(), Shape::Square);

        let mut seen = Vec::new();
        for _ in 0..4 {
            hay.tick();
            seen.push(hay.color());
        }
        assert_eq!(seen, vec![Color::RED, Color::YELLOW, Color::RED, Color::YELLOW]);
        assert_eq!(hay.steps(), 4);
    }

    #[test]
    fn test_counter_saturates() {
        let mut hay = Hay { steps: u64::MAX };
        hay.tick();
        assert_eq!(hay.steps(), u64::MAX);
        assert_eq!(hay.color(), Color::RED);
    }
}
