//! Valley simulation engine.
//!
//! A square grid of cells, each holding at most one unit. Every tick a
//! raster scan lets each occupant run its species' behavior: animals move,
//! hunt, graze and breed, while grass and hay change only their own state.

pub mod animal;
pub mod census;
pub mod exchange;
pub mod grid;
pub mod registry;
pub mod simulation;
pub mod snapshot;
pub mod species;
pub mod turn;
pub mod unit;

pub use animal::{Animal, MAX_ENERGY};
pub use census::Census;
pub use grid::Grid;
pub use registry::Registry;
pub use simulation::Valley;
pub use snapshot::Snapshot;
pub use turn::Turn;
pub use unit::{Behavior, Body, CellView, Unit, UnitId};
