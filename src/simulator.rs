//! The grid simulator: owns the grid, the rule parameters and the clock.
//!
//! A `Simulator` is either uninitialized (no grid) or ready. `initialize`
//! moves it to ready, replacing any previous grid wholesale; `step`, queries
//! and `advance` fail with `NotInitialized` until then. Rule parameters live
//! outside the grid state and survive re-initialization.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::automaton::{self, Grid, StepSummary};
use crate::config::{RuleParameter, RuleParameters, SimulatorConfig};
use crate::error::{Result, SimError};

/// Grid plus its generation counter and clock accumulator.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub grid: Grid,
    pub generation: u64,
    /// Time accumulated towards the next clock-driven step.
    pub clock: Duration,
}

pub struct Simulator {
    state: Option<SimulationState>,
    rules: RuleParameters,
    thread_pool: Option<rayon::ThreadPool>,
    initializations: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create an uninitialized simulator with default rules.
    pub fn new() -> Self {
        Simulator {
            state: None,
            rules: RuleParameters::default(),
            thread_pool: None,
            initializations: 0,
        }
    }

    /// Create an uninitialized simulator whose steps run on a dedicated
    /// rayon pool. A thread count of 0 is treated as 1.
    pub fn with_threads(num_threads: u8) -> Result<Self> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1) as usize)
            .build()?;
        Ok(Simulator {
            thread_pool: Some(thread_pool),
            ..Self::new()
        })
    }

    /// Build, configure and initialize a simulator in one go.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.rules.validate()?;
        let mut sim = if config.threads > 0 {
            Self::with_threads(config.threads)?
        } else {
            Self::new()
        };
        sim.rules = config.rules;

        let board = config.board;
        match config.seed {
            Some(seed) => sim.initialize_seeded(
                board.width,
                board.height,
                board.depth,
                board.spawn_probability,
                seed,
            )?,
            None => sim.initialize(
                board.width,
                board.height,
                board.depth,
                board.spawn_probability,
            )?,
        }
        Ok(sim)
    }

    /// Replace the grid with a fresh random one and reset the generation.
    ///
    /// Dimensions must be at least 1 (`InvalidDimension` otherwise).
    /// `spawn_probability` is used as-is; callers clamp it to [0, 1].
    /// Nothing from the previous grid carries over. On error the previous
    /// state is kept.
    pub fn initialize(
        &mut self,
        width: i32,
        height: i32,
        depth: i32,
        spawn_probability: f32,
    ) -> Result<()> {
        self.initialize_with_rng(
            width,
            height,
            depth,
            spawn_probability,
            &mut rand::thread_rng(),
        )
    }

    /// Like [`initialize`](Self::initialize), drawing from a seeded generator.
    pub fn initialize_seeded(
        &mut self,
        width: i32,
        height: i32,
        depth: i32,
        spawn_probability: f32,
        seed: u64,
    ) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.initialize_with_rng(width, height, depth, spawn_probability, &mut rng)
    }

    pub fn initialize_with_rng<R: Rng + ?Sized>(
        &mut self,
        width: i32,
        height: i32,
        depth: i32,
        spawn_probability: f32,
        rng: &mut R,
    ) -> Result<()> {
        let grid = Grid::random(width, height, depth, spawn_probability, rng)?;
        info!(
            "initialized {}x{}x{} grid, spawn probability {}, {} alive",
            width,
            height,
            depth,
            spawn_probability,
            grid.alive_count()
        );
        self.state = Some(SimulationState {
            grid,
            generation: 0,
            clock: Duration::ZERO,
        });
        self.initializations += 1;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of successful initializations so far. Changes whenever the
    /// grid is replaced, even if the new one has the same dimensions.
    pub fn initializations(&self) -> u64 {
        self.initializations
    }

    pub fn rules(&self) -> &RuleParameters {
        &self.rules
    }

    /// Overwrite one rule parameter. Takes effect on the next step.
    pub fn set_rule_parameter(&mut self, param: RuleParameter) -> Result<()> {
        if let Err(err) = self.rules.apply(param) {
            warn!("rejected {:?}: {}", param, err);
            return Err(err);
        }
        debug!("rule parameter set: {:?}", param);
        Ok(())
    }

    pub fn set_time_step(&mut self, seconds: f32) -> Result<()> {
        self.set_rule_parameter(RuleParameter::TimeStep(seconds))
    }

    pub fn set_underpopulation_threshold(&mut self, threshold: i32) {
        self.rules.underpopulation_threshold = threshold;
        debug!("underpopulation threshold set to {}", threshold);
    }

    pub fn set_reproduction_criterion(&mut self, criterion: i32) {
        self.rules.reproduction_criterion = criterion;
        debug!("reproduction criterion set to {}", criterion);
    }

    pub fn set_overpopulation_threshold(&mut self, threshold: i32) {
        self.rules.overpopulation_threshold = threshold;
        debug!("overpopulation threshold set to {}", threshold);
    }

    pub fn state(&self) -> Result<&SimulationState> {
        self.state.as_ref().ok_or(SimError::NotInitialized)
    }

    fn state_mut(&mut self) -> Result<&mut SimulationState> {
        self.state.as_mut().ok_or(SimError::NotInitialized)
    }

    pub fn grid(&self) -> Result<&Grid> {
        Ok(&self.state()?.grid)
    }

    pub fn generation(&self) -> Result<u64> {
        Ok(self.state()?.generation)
    }

    pub fn dimensions(&self) -> Result<(i32, i32, i32)> {
        Ok(self.grid()?.dimensions())
    }

    pub fn is_alive(&self, x: i32, y: i32, z: i32) -> Result<bool> {
        self.grid()?.is_alive(x, y, z)
    }

    /// Write one cell of the current generation.
    pub fn set_alive(&mut self, x: i32, y: i32, z: i32, alive: bool) -> Result<()> {
        self.state_mut()?.grid.set_alive(x, y, z, alive)
    }

    pub fn alive_count(&self) -> Result<usize> {
        Ok(self.grid()?.alive_count())
    }

    pub fn alive_cells(&self) -> Result<impl Iterator<Item = (i32, i32, i32)> + '_> {
        Ok(self.grid()?.alive_cells())
    }

    pub fn extract_region(&self, min: [i32; 3], max: [i32; 3], out: &mut [u8]) -> Result<usize> {
        Ok(automaton::extract_region(self.grid()?, min, max, out))
    }

    pub fn import_region(&mut self, min: [i32; 3], max: [i32; 3], input: &[u8]) -> Result<usize> {
        Ok(automaton::import_region(
            &mut self.state_mut()?.grid,
            min,
            max,
            input,
        ))
    }

    /// Advance every cell by one generation, synchronously.
    pub fn step(&mut self) -> Result<StepSummary> {
        let Simulator {
            state,
            rules,
            thread_pool,
            ..
        } = self;
        let state = state.as_mut().ok_or(SimError::NotInitialized)?;

        let (births, deaths, alive) = match thread_pool {
            Some(pool) => pool.install(|| automaton::step_grid(&mut state.grid, rules)),
            None => automaton::step_grid(&mut state.grid, rules),
        };
        state.generation += 1;

        let summary = StepSummary {
            generation: state.generation,
            births,
            deaths,
            alive,
        };
        debug!("{:?}", summary);
        Ok(summary)
    }

    /// Feed elapsed wall time into the clock.
    ///
    /// Once the accumulated time reaches the current time step, performs one
    /// step and resets the accumulator; leftover time is dropped, so there is
    /// at most one step per call. Returns the step summary if a step ran.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Option<StepSummary>> {
        let interval = self.rules.tick_interval();
        let state = self.state_mut()?;
        state.clock = state.clock.saturating_add(elapsed);
        if state.clock < interval {
            return Ok(None);
        }
        state.clock = Duration::ZERO;
        self.step().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    #[test]
    fn test_uninitialized_operations_fail() {
        let mut sim = Simulator::new();
        assert!(!sim.is_initialized());
        assert!(matches!(sim.step(), Err(SimError::NotInitialized)));
        assert!(matches!(sim.is_alive(0, 0, 0), Err(SimError::NotInitialized)));
        assert!(matches!(sim.dimensions(), Err(SimError::NotInitialized)));
        assert!(matches!(
            sim.set_alive(0, 0, 0, true),
            Err(SimError::NotInitialized)
        ));
        assert!(matches!(
            sim.advance(Duration::from_secs(1)),
            Err(SimError::NotInitialized)
        ));
    }

    #[test]
    fn test_parameters_settable_before_initialize() {
        let mut sim = Simulator::new();
        sim.set_time_step(0.25).unwrap();
        sim.set_underpopulation_threshold(1);
        sim.set_reproduction_criterion(2);
        sim.set_overpopulation_threshold(3);

        sim.initialize_seeded(4, 4, 4, 0.5, 1).unwrap();
        let rules = sim.rules();
        assert_eq!(rules.time_step, 0.25);
        assert_eq!(rules.underpopulation_threshold, 1);
        assert_eq!(rules.reproduction_criterion, 2);
        assert_eq!(rules.overpopulation_threshold, 3);
    }

    #[test]
    fn test_negative_time_step_rejected() {
        let mut sim = Simulator::new();
        assert!(matches!(
            sim.set_time_step(-1.0),
            Err(SimError::InvalidParameter(_))
        ));
        assert_eq!(sim.rules().time_step, 0.1);
    }

    #[test]
    fn test_failed_initialize_keeps_previous_grid() {
        let mut sim = Simulator::new();
        sim.initialize_seeded(3, 3, 3, 1.0, 5).unwrap();
        assert!(matches!(
            sim.initialize(0, 3, 3, 0.5),
            Err(SimError::InvalidDimension { .. })
        ));
        assert_eq!(sim.dimensions().unwrap(), (3, 3, 3));
        assert_eq!(sim.alive_count().unwrap(), 27);
    }

    #[test]
    fn test_step_increments_generation() {
        let mut sim = Simulator::new();
        sim.initialize_seeded(5, 5, 5, 0.35, 3).unwrap();
        assert_eq!(sim.generation().unwrap(), 0);

        assert_eq!(sim.step().unwrap().generation, 1);
        assert_eq!(sim.step().unwrap().generation, 2);
        assert_eq!(sim.generation().unwrap(), 2);
    }

    #[test]
    fn test_summary_matches_grid() {
        let mut sim = Simulator::new();
        sim.initialize_seeded(10, 10, 10, 0.35, 11).unwrap();
        let before = sim.alive_count().unwrap();

        let summary = sim.step().unwrap();
        assert_eq!(summary.alive, sim.alive_count().unwrap());
        assert_eq!(before + summary.births - summary.deaths, summary.alive);
    }

    #[test]
    fn test_parameter_change_applies_on_next_step() {
        let mut sim = Simulator::new();
        sim.initialize(3, 3, 3, 0.0).unwrap();
        sim.set_alive(1, 1, 1, true).unwrap();

        // Allow an isolated cell to survive
        sim.set_underpopulation_threshold(0);
        sim.step().unwrap();
        assert!(sim.is_alive(1, 1, 1).unwrap());

        sim.set_underpopulation_threshold(1);
        assert!(sim.is_alive(1, 1, 1).unwrap());
        sim.step().unwrap();
        assert!(!sim.is_alive(1, 1, 1).unwrap());
    }

    #[test]
    fn test_advance_steps_once_interval_elapsed() {
        let mut sim = Simulator::new();
        sim.initialize(4, 4, 4, 0.0).unwrap();
        sim.set_time_step(0.5).unwrap();

        assert!(sim.advance(Duration::from_millis(200)).unwrap().is_none());
        assert!(sim.advance(Duration::from_millis(200)).unwrap().is_none());
        let summary = sim.advance(Duration::from_millis(200)).unwrap();
        assert_eq!(summary.map(|s| s.generation), Some(1));
        assert_eq!(sim.state().unwrap().clock, Duration::ZERO);
    }

    #[test]
    fn test_advance_at_most_one_step_per_call() {
        let mut sim = Simulator::new();
        sim.initialize(4, 4, 4, 0.0).unwrap();
        sim.set_time_step(0.1).unwrap();

        assert!(sim.advance(Duration::from_secs(10)).unwrap().is_some());
        assert_eq!(sim.generation().unwrap(), 1);
    }

    #[test]
    fn test_advance_zero_time_step_steps_every_call() {
        let mut sim = Simulator::new();
        sim.initialize(2, 2, 2, 0.0).unwrap();
        sim.set_time_step(0.0).unwrap();

        for expected in 1..=3 {
            sim.advance(Duration::ZERO).unwrap();
            assert_eq!(sim.generation().unwrap(), expected);
        }
    }

    #[test]
    fn test_advance_saturates_huge_elapsed() {
        let mut sim = Simulator::new();
        sim.initialize(2, 2, 2, 0.0).unwrap();

        assert!(sim.advance(Duration::from_millis(1)).unwrap().is_none());
        let summary = sim.advance(Duration::MAX).unwrap();
        assert_eq!(summary.map(|s| s.generation), Some(1));
        assert_eq!(sim.state().unwrap().clock, Duration::ZERO);
    }

    #[test]
    fn test_initialize_rejects_unallocatable_grid() {
        let mut sim = Simulator::new();
        assert!(matches!(
            sim.initialize(2_097_152, 2_097_152, 2_097_152, 0.0),
            Err(SimError::InvalidDimension { .. })
        ));
        assert!(!sim.is_initialized());
        assert_eq!(sim.initializations(), 0);
    }

    #[test]
    fn test_threshold_setters_leave_time_step_alone() {
        let mut sim = Simulator::new();
        sim.set_underpopulation_threshold(-3);
        sim.set_reproduction_criterion(99);
        sim.set_overpopulation_threshold(0);

        assert_eq!(
            *sim.rules(),
            RuleParameters {
                underpopulation_threshold: -3,
                reproduction_criterion: 99,
                overpopulation_threshold: 0,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_initializations_counter() {
        let mut sim = Simulator::new();
        sim.initialize(2, 2, 2, 0.0).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.initializations(), 1);

        sim.initialize(2, 2, 2, 0.0).unwrap();
        assert_eq!(sim.initializations(), 2);
        assert!(sim.initialize(0, 2, 2, 0.0).is_err());
        assert_eq!(sim.initializations(), 2);
    }

    #[test]
    fn test_reinitialize_resets_clock_and_generation() {
        let mut sim = Simulator::new();
        sim.initialize(4, 4, 4, 0.0).unwrap();
        sim.step().unwrap();
        sim.advance(Duration::from_millis(50)).unwrap();

        sim.initialize(2, 2, 2, 0.0).unwrap();
        let state = sim.state().unwrap();
        assert_eq!(state.generation, 0);
        assert_eq!(state.clock, Duration::ZERO);
    }

    #[test]
    fn test_thread_pool_matches_global_pool() {
        let mut pooled = Simulator::with_threads(2).unwrap();
        let mut plain = Simulator::new();
        pooled.initialize_seeded(12, 9, 6, 0.4, 21).unwrap();
        plain.initialize_seeded(12, 9, 6, 0.4, 21).unwrap();
        for sim in [&mut pooled, &mut plain] {
            sim.set_underpopulation_threshold(4);
            sim.set_reproduction_criterion(5);
            sim.set_overpopulation_threshold(9);
        }

        for _ in 0..3 {
            assert_eq!(pooled.step().unwrap(), plain.step().unwrap());
        }
        let a: Vec<_> = pooled.alive_cells().unwrap().collect();
        let b: Vec<_> = plain.alive_cells().unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_threads_treated_as_one() {
        assert!(Simulator::with_threads(0).is_ok());
    }

    #[test]
    fn test_from_config_seeded() {
        let config = SimulatorConfig {
            board: BoardConfig {
                width: 6,
                height: 5,
                depth: 4,
                spawn_probability: 0.5,
            },
            rules: RuleParameters {
                reproduction_criterion: 3,
                ..Default::default()
            },
            threads: 1,
            seed: Some(77),
        };
        let a = Simulator::from_config(&config).unwrap();
        let b = Simulator::from_config(&config).unwrap();

        assert_eq!(a.dimensions().unwrap(), (6, 5, 4));
        assert_eq!(a.rules().reproduction_criterion, 3);
        assert_eq!(
            a.alive_cells().unwrap().collect::<Vec<_>>(),
            b.alive_cells().unwrap().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_from_config_rejects_bad_board() {
        let config = SimulatorConfig {
            board: BoardConfig {
                depth: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            Simulator::from_config(&config),
            Err(SimError::InvalidDimension { .. })
        ));
    }
}
