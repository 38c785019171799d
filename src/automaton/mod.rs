//! Core automaton logic and grid operations.
//!
//! This module contains the cell buffer, the transition rule, the
//! synchronous step and region transfer. The `Simulator` and the FFI layer
//! call into these functions.

pub mod grid;
pub mod region;
pub mod stepping;

pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use region::{extract_region, import_region, region_volume};
pub use stepping::{next_state, step_grid, StepSummary};
