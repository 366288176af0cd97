//! Grass: an immobile resource that regrows after being eaten.

use crate::turn::Turn;
use crate::unit::Behavior;
use serde::{Deserialize, Serialize};
use valley_core::{Color, Shape};

/// Ticks spent bare before sprouting
const REGROW_TICKS: u32 = 10;
/// Ticks spent sprouting before maturing
const MATURE_TICKS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Eaten,
    Growing,
    Mature,
}

impl GrowthStage {
    /// Numeric level: 0 eaten, 1 growing, 2 mature
    pub fn level(&self) -> u8 {
        match self {
            GrowthStage::Eaten => 0,
            GrowthStage::Growing => 1,
            GrowthStage::Mature => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grass {
    stage: GrowthStage,
    ticks_in_stage: u32,
}

impl Grass {
    pub fn new() -> Self {
        Self {
            stage: GrowthStage::Mature,
            ticks_in_stage: 0,
        }
    }

    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    pub fn is_mature(&self) -> bool {
        self.stage == GrowthStage::Mature
    }

    /// Crop the grass back to bare ground. Already-bare grass is unchanged.
    pub fn be_eaten(&mut self) {
        if self.stage != GrowthStage::Eaten {
            self.stage = GrowthStage::Eaten;
            self.ticks_in_stage = 0;
        }
    }

    /// Advance the regrowth clock by one tick
    pub fn grow(&mut self) {
        let (limit, next) = match self.stage {
            GrowthStage::Eaten => (REGROW_TICKS, GrowthStage::Growing),
            GrowthStage::Growing => (MATURE_TICKS, GrowthStage::Mature),
            GrowthStage::Mature => return,
        };

        self.ticks_in_stage = self.ticks_in_stage.saturating_add(1);
        if self.ticks_in_stage >= limit {
            self.stage = next;
            self.ticks_in_stage = 0;
        }
    }
}

impl Default for Grass {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Grass {
    fn act(&mut self, _turn: &mut Turn<'_>) {
        self.grow();
    }

    fn color(&self) -> Color {
        match self.stage {
            GrowthStage::Eaten => Color::SIENNA,
            GrowthStage::Growing => Color::LIGHT_GREEN,
            GrowthStage::Mature => Color::FOREST_GREEN,
        }
    }
}
