//! Background loop that steps a shared simulator on a fixed cadence.
//!
//! The loop waits one time step, then locks the simulator and steps it. The
//! interval is reread from the rule parameters at the start of every wait, so
//! a new time step applies to the next wait, not the current one. A grid
//! re-initialized during a wait gets a full fresh wait before its first step.
//! Queries through the same mutex always observe a whole generation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::error::SimError;
use crate::simulator::Simulator;

pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Handle to a running step loop. Dropping it stops the loop.
pub struct Driver {
    stop: Arc<AtomicBool>,
    steps: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Driver {
    /// Start stepping `sim` on a new thread.
    pub fn spawn(sim: SharedSimulator) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let steps = Arc::new(AtomicU64::new(0));

        let handle = {
            let stop = Arc::clone(&stop);
            let steps = Arc::clone(&steps);
            thread::spawn(move || run_loop(&sim, &stop, &steps))
        };
        info!("step driver started");

        Driver {
            stop,
            steps,
            handle: Some(handle),
        }
    }

    /// Steps performed by this driver so far.
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the loop and wait for it. A step already in progress completes.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                error!("step driver thread panicked");
            }
            info!("step driver stopped after {} steps", self.steps());
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(sim: &Mutex<Simulator>, stop: &AtomicBool, steps: &AtomicU64) {
    loop {
        let (interval, board) = match sim.lock() {
            Ok(guard) => (guard.rules().tick_interval(), guard.initializations()),
            Err(_) => {
                error!("simulator mutex poisoned, stopping step driver");
                return;
            }
        };
        wait(interval, stop);
        if stop.load(Ordering::Acquire) {
            return;
        }

        let mut guard = match sim.lock() {
            Ok(guard) => guard,
            Err(_) => {
                error!("simulator mutex poisoned, stopping step driver");
                return;
            }
        };
        if guard.initializations() != board {
            debug!("grid replaced during wait, restarting wait");
            continue;
        }
        match guard.step() {
            Ok(_) => {
                steps.fetch_add(1, Ordering::AcqRel);
            }
            Err(SimError::NotInitialized) => debug!("no grid yet, skipping step"),
            Err(err) => {
                error!("step failed: {}", err);
                return;
            }
        }
    }
}

/// Park until `interval` has elapsed or a stop is requested.
fn wait(interval: Duration, stop: &AtomicBool) {
    if interval.is_zero() {
        thread::yield_now();
        return;
    }
    let deadline = Instant::now() + interval;
    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        // Spurious wakeups just loop back around
        thread::park_timeout(deadline - now);
    }
}
