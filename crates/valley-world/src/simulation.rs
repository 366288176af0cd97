//! Tick driver for a valley.

use crate::census::Census;
use crate::grid::Grid;
use crate::turn::Turn;
use crate::unit::{Body, CellView, UnitId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, info, instrument, trace, warn};
use valley_core::{Position, Result, Species, TickOrder, ValleyConfig};

pub struct Valley {
    grid: Grid,
    rng: ChaCha8Rng,
    config: ValleyConfig,
    tick: u64,
}

impl Valley {
    /// An empty valley
    pub fn new(config: ValleyConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::new(config.size);

        Ok(Self {
            grid,
            rng,
            config,
            tick: 0,
        })
    }

    /// The classic starting scene: two wolves, two sheep and two bales of hay.
    /// Placements that fall outside a small grid are skipped.
    pub fn with_default_units(config: ValleyConfig) -> Result<Self> {
        let mut valley = Self::new(config)?;
        let last = valley.size() - 1;
        let scene = [
            (Species::Wolf, Position::new(10, 10)),
            (Species::Wolf, Position::new(15, 15)),
            (Species::Sheep, Position::new(3, 4)),
            (Species::Sheep, Position::new(6, 8)),
            (Species::Hay, Position::new(0, 0)),
            (Species::Hay, Position::new(0, last)),
        ];

        for (species, pos) in scene {
            if valley.grid.in_bounds(pos) && valley.grid.is_empty(pos) {
                valley.spawn(species, pos)?;
            }
        }
        Ok(valley)
    }

    /// Rebuild a valley around an existing grid. The RNG is reseeded from
    /// the configured seed mixed with the tick, so resumed runs stay
    /// deterministic.
    pub(crate) fn from_parts(config: ValleyConfig, grid: Grid, tick: u64) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed ^ tick);
        Ok(Self {
            grid,
            rng,
            config,
            tick,
        })
    }

    pub fn config(&self) -> &ValleyConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    pub fn insert(&mut self, pos: Position, body: Body) -> Result<UnitId> {
        self.grid.insert(pos, body)
    }

    /// Place a fresh unit of `species`
    pub fn spawn(&mut self, species: Species, pos: Position) -> Result<UnitId> {
        self.grid.insert(pos, Body::default_for(species))
    }

    /// Run one behavior step for the occupant of `pos`.
    /// Returns false if the cell is empty or outside the grid.
    pub fn act_at(&mut self, pos: Position) -> bool {
        let Some(mut unit) = self.grid.remove(pos) else {
            return false;
        };

        let mut turn = Turn::new(&mut self.grid, &mut self.rng, pos);
        unit.body.behavior_mut().act(&mut turn);
        let (here, alive) = (turn.here(), turn.is_alive());

        if !alive {
            debug!(
                tick = self.tick,
                species = %unit.species(),
                id = %unit.id,
                row = here.row,
                column = here.column,
                days = ?unit.animal().map(|a| a.days()),
                "Unit died"
            );
            return true;
        }

        if here != pos {
            trace!(
                id = %unit.id,
                from = %pos,
                to = %here,
                "Unit moved"
            );
        }
        if let Err(err) = self.grid.place(here, Some(unit)) {
            warn!(error = %err, "Acting unit ended its turn outside the grid");
        }
        true
    }

    /// Advance the valley by one tick: a row-major raster scan in which each
    /// visited occupant acts.
    pub fn tick(&mut self) {
        match self.config.tick_order {
            TickOrder::LiveScan => self.tick_live_scan(),
            TickOrder::Snapshot => self.tick_snapshot(),
        }
        self.tick += 1;
    }

    fn tick_live_scan(&mut self) {
        for index in 0..self.grid.cell_count() {
            let pos = self.grid.index_to_pos(index);
            self.act_at(pos);
        }
    }

    fn tick_snapshot(&mut self) {
        // The roster alone keeps newborns out of their birth tick, so a
        // pending skip flag would cost them a second turn
        let mut roster = HashSet::new();
        for unit in self.grid.units_mut() {
            unit.body.wake();
            roster.insert(unit.id);
        }

        for index in 0..self.grid.cell_count() {
            let pos = self.grid.index_to_pos(index);
            let Some(id) = self.grid.get(pos).map(|unit| unit.id) else {
                continue;
            };
            // Each unit present at tick start acts once; newborns never do
            if roster.remove(&id) {
                self.act_at(pos);
            }
        }
    }

    /// Run `ticks` ticks, logging a census every `log_every` ticks
    /// (0 disables the periodic log). Returns the final census.
    #[instrument(skip(self), fields(start_tick = self.tick))]
    pub fn run(&mut self, ticks: u64, log_every: u64) -> Census {
        info!(
            ticks,
            size = self.size(),
            population = self.grid.population(),
            "Starting valley run"
        );

        for _ in 0..ticks {
            self.tick();
            if log_every > 0 && self.tick % log_every == 0 {
                self.log_census();
            }
        }

        let census = self.census();
        info!(
            tick = self.tick,
            total_population = census.total(),
            animals = census.animals(),
            "Valley run finished"
        );
        census
    }

    fn log_census(&self) {
        let census = self.census();
        info!(
            event = "population_metrics",
            tick = self.tick,
            total_population = census.total(),
            animals = census.animals(),
            wolves = census.count(Species::Wolf),
            sheep = census.count(Species::Sheep),
            foxes = census.count(Species::Fox),
            pair_wolves = census.count(Species::WolfLotVol),
            pair_sheep = census.count(Species::SheepLotVol),
            "Population census"
        );
    }

    pub fn census(&self) -> Census {
        Census::take(&self.grid, self.tick)
    }

    /// Render data for every occupied cell, row-major
    pub fn cells(&self) -> Vec<CellView> {
        self.grid.units().map(|unit| unit.view()).collect()
    }

    /// Text map: one glyph per species, `.` for an empty cell
    pub fn render_ascii(&self) -> String {
        let size = self.size();
        let mut out = String::with_capacity(self.grid.cell_count() + size.max(0) as usize);
        for row in 0..size {
            for column in 0..size {
                let glyph = self
                    .grid
                    .get(Position::new(row, column))
                    .map_or('.', |unit| unit.species().glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Fox, Grass, Sheep, WolfLotVol};
    use valley_core::Error;

    fn config(tick_order: TickOrder) -> ValleyConfig {
        ValleyConfig {
            seed: 42,
            tick_order,
            ..Default::default()
        }
    }

    #[test]
    fn test_valley_creation() {
        let valley = Valley::new(ValleyConfig::default()).unwrap();
        assert_eq!(valley.size(), 25);
        assert_eq!(valley.tick_count(), 0);
        assert!(valley.cells().is_empty());

        let err = Valley::new(ValleyConfig {
            size: 0,
            ..Default::default()
        });
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_default_units() {
        let valley = Valley::with_default_units(ValleyConfig::default()).unwrap();
        let census = valley.census();
        assert_eq!(census.count(Species::Wolf), 2);
        assert_eq!(census.count(Species::Sheep), 2);
        assert_eq!(census.count(Species::Hay), 2);
        assert!(valley.grid().get(Position::new(0, 24)).is_some());

        let small = Valley::with_default_units(ValleyConfig {
            size: 12,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(small.census().count(Species::Wolf), 1);
        assert!(small.grid().get(Position::new(0, 11)).is_some());
    }

    #[test]
    fn test_act_at_empty_cell() {
        let mut valley = Valley::new(ValleyConfig::default()).unwrap();
        assert!(!valley.act_at(Position::new(3, 3)));
        assert!(!valley.act_at(Position::new(-3, 3)));
    }

    #[test]
    fn test_live_scan_lets_units_act_again() {
        let mut valley = Valley::new(config(TickOrder::LiveScan)).unwrap();
        valley.insert(Position::new(5, 5), Body::Fox(Fox::new())).unwrap();

        valley.tick();

        // The fox keeps landing ahead of the scan until it reaches the edge
        let unit = valley.grid().get(Position::new(5, 24)).unwrap();
        assert_eq!(unit.energy(), Some(60 - 19));
        assert_eq!(unit.animal().unwrap().days(), 20);
        assert_eq!(valley.tick_count(), 1);
    }

    #[test]
    fn test_snapshot_order_acts_once() {
        let mut valley = Valley::new(config(TickOrder::Snapshot)).unwrap();
        valley.insert(Position::new(5, 5), Body::Fox(Fox::new())).unwrap();

        valley.tick();

        let unit = valley.grid().get(Position::new(5, 6)).unwrap();
        assert_eq!(unit.energy(), Some(59));
        assert_eq!(unit.animal().unwrap().days(), 1);
    }

    #[test]
    fn test_snapshot_order_skips_newborns() {
        let mut valley = Valley::new(config(TickOrder::Snapshot)).unwrap();
        valley
            .insert(Position::new(10, 10), Body::WolfLotVol(WolfLotVol::new()))
            .unwrap();
        valley
            .insert(Position::new(10, 11), Body::WolfLotVol(WolfLotVol::new()))
            .unwrap();

        valley.tick();

        let wolves: Vec<_> = valley
            .grid()
            .units()
            .filter_map(|unit| match &unit.body {
                Body::WolfLotVol(wolf) => Some(wolf),
                _ => None,
            })
            .collect();
        assert!(wolves.len() > 2);
        for wolf in wolves {
            let days = wolf.animal.days();
            assert!(days <= 1);
            // Every unit acted exactly once, or was born this tick and waits
            assert!(days == 1 || wolf.skips_next_turn());
        }
    }

    #[test]
    fn test_snapshot_order_newborn_acts_next_tick() {
        let mut valley = Valley::new(config(TickOrder::Snapshot)).unwrap();
        let first = valley
            .insert(Position::new(10, 10), Body::WolfLotVol(WolfLotVol::new()))
            .unwrap();
        let second = valley
            .insert(Position::new(10, 11), Body::WolfLotVol(WolfLotVol::new()))
            .unwrap();

        valley.tick();
        let newborns: Vec<UnitId> = valley
            .grid()
            .units()
            .map(|unit| unit.id)
            .filter(|id| *id != first && *id != second)
            .collect();
        assert!(!newborns.is_empty());

        valley.tick();
        for id in newborns {
            let unit = valley.grid().units().find(|unit| unit.id == id).unwrap();
            assert_eq!(unit.animal().unwrap().days(), 1);
        }
    }

    #[test]
    fn test_resources_tick() {
        let mut valley = Valley::new(ValleyConfig::default()).unwrap();
        let pos = Position::new(2, 2);
        let mut grass = Grass::new();
        grass.be_eaten();
        valley.insert(pos, Body::Grass(grass)).unwrap();

        for _ in 0..13 {
            valley.tick();
        }

        match &valley.grid().get(pos).unwrap().body {
            Body::Grass(grass) => assert!(grass.is_mature()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_same_seed_same_valley() {
        let run = || {
            let mut valley = Valley::with_default_units(config(TickOrder::LiveScan)).unwrap();
            valley
                .insert(Position::new(20, 3), Body::Fox(Fox::new()))
                .unwrap();
            valley.run(40, 10);
            valley.cells()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_run_returns_final_census() {
        let mut valley = Valley::with_default_units(ValleyConfig::default()).unwrap();
        let census = valley.run(5, 0);
        assert_eq!(census.tick, 5);
        assert_eq!(valley.tick_count(), 5);
        assert_eq!(census.count(Species::Hay), 2);
    }

    #[test]
    fn test_render_ascii() {
        let mut valley = Valley::new(ValleyConfig {
            size: 3,
            ..Default::default()
        })
        .unwrap();
        valley.insert(Position::new(0, 1), Body::Sheep(Sheep::new())).unwrap();
        valley.spawn(Species::Hay, Position::new(2, 2)).unwrap();

        assert_eq!(valley.render_ascii(), ".S.\n...\n..h\n");
    }
}
