//! Life3D - 3D Cellular Automaton Simulator
//!
//! A three-dimensional Game of Life: a dense grid of boolean cells that
//! advances one generation per step using the 26-cell Moore neighborhood and
//! configurable underpopulation, reproduction and overpopulation thresholds.
//!
//! The Rust API lives in [`Simulator`]; [`driver::Driver`] steps a shared
//! simulator on its own thread, and `ffi` exposes a C ABI for foreign
//! presentation layers.

pub mod automaton;
pub mod config;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod simulator;


pub use automaton::{Grid, StepSummary};
pub use config::{BoardConfig, RuleParameter, RuleParameters, SimulatorConfig};
pub use driver::{Driver, SharedSimulator};
pub use error::{Result, SimError};
pub use simulator::{SimulationState, Simulator};
