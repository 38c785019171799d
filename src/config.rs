//! Default values, rule parameters and JSON-loadable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

pub const DEFAULT_SIZE: i32 = 20;
pub const DEFAULT_TIME_STEP: f32 = 0.1;
pub const DEFAULT_UNDERPOPULATION_THRESHOLD: i32 = 7;
pub const DEFAULT_REPRODUCTION_CRITERION: i32 = 10;
pub const DEFAULT_OVERPOPULATION_THRESHOLD: i32 = 12;
pub const DEFAULT_SPAWN_PROBABILITY: f32 = 0.35;

/// Thresholds of the transition rule plus the tick interval.
///
/// No relationship between the thresholds is enforced. An underpopulation
/// threshold above the overpopulation threshold, or a reproduction criterion
/// above 26, is accepted and simply evaluated as written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParameters {
    /// Seconds between steps when driven by a clock.
    pub time_step: f32,
    /// Alive cells with fewer alive neighbors die.
    pub underpopulation_threshold: i32,
    /// Dead cells with exactly this many alive neighbors are born.
    pub reproduction_criterion: i32,
    /// Alive cells with more alive neighbors die.
    pub overpopulation_threshold: i32,
}

impl Default for RuleParameters {
    fn default() -> Self {
        RuleParameters {
            time_step: DEFAULT_TIME_STEP,
            underpopulation_threshold: DEFAULT_UNDERPOPULATION_THRESHOLD,
            reproduction_criterion: DEFAULT_REPRODUCTION_CRITERION,
            overpopulation_threshold: DEFAULT_OVERPOPULATION_THRESHOLD,
        }
    }
}

/// A single rule parameter update, as issued by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleParameter {
    TimeStep(f32),
    UnderpopulationThreshold(i32),
    ReproductionCriterion(i32),
    OverpopulationThreshold(i32),
}

impl RuleParameters {
    /// Overwrite one field. Only the time step is validated.
    pub fn apply(&mut self, param: RuleParameter) -> Result<()> {
        match param {
            RuleParameter::TimeStep(seconds) => {
                validate_time_step(seconds)?;
                self.time_step = seconds;
            }
            RuleParameter::UnderpopulationThreshold(v) => self.underpopulation_threshold = v,
            RuleParameter::ReproductionCriterion(v) => self.reproduction_criterion = v,
            RuleParameter::OverpopulationThreshold(v) => self.overpopulation_threshold = v,
        }
        Ok(())
    }

    /// Tick interval as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(self.time_step)
    }

    pub fn validate(&self) -> Result<()> {
        validate_time_step(self.time_step)
    }
}

fn validate_time_step(seconds: f32) -> Result<()> {
    // Duration::from_secs_f32 panics on negative, NaN and overflowing input.
    if !seconds.is_finite() || seconds < 0.0 || seconds > u32::MAX as f32 {
        return Err(SimError::InvalidParameter(format!(
            "time step must be a finite number of seconds >= 0, got {seconds}"
        )));
    }
    Ok(())
}

/// Board shape and spawn density used by an initialize request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub spawn_probability: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            depth: DEFAULT_SIZE,
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
        }
    }
}

/// Everything needed to bring a simulator up in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub board: BoardConfig,
    pub rules: RuleParameters,
    /// Size of a dedicated step thread pool. 0 uses rayon's global pool.
    pub threads: u8,
    /// Seed for the spawn draw. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.rules.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
