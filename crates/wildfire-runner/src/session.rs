//! Session that owns the single live simulation and the controls acting on it.

use crate::auto_run::{AutoRun, RunOutcome, StepObserver};
use crate::history::History;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use wildfire_core::{Error, ForestConfig, Position, Result, RunConfig, StepReport};
use wildfire_world::{Grid, Simulation};

/// Simulation plus the chart series it feeds
pub struct ForestState {
    pub simulation: Simulation,
    pub history: History,
}

impl ForestState {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            history: History::new(),
        }
    }
}

pub type SharedForest = Arc<Mutex<ForestState>>;

pub struct Session {
    forest: Option<SharedForest>,
    auto_run: Option<AutoRun>,
    run_config: RunConfig,
    observer: Option<StepObserver>,
}

impl Session {
    pub fn new(run_config: RunConfig) -> Self {
        Self {
            forest: None,
            auto_run: None,
            run_config,
            observer: None,
        }
    }

    /// Notify `observer` after every step, manual or automatic
    pub fn with_observer(mut self, observer: StepObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build a fresh forest, replacing any previous one.
    ///
    /// Rejects a non-positive size or tree count before anything is built and
    /// stops a running auto-run first.
    #[instrument(skip(self))]
    pub async fn generate(&mut self, config: &ForestConfig) -> Result<()> {
        config.validate()?;
        self.stop_run().await;

        let simulation = Simulation::from_config(config)?;
        self.forest = Some(Arc::new(Mutex::new(ForestState::new(simulation))));
        Ok(())
    }

    /// Ignite one random tree. `Ok(None)` means there was nothing left to burn.
    #[instrument(skip(self))]
    pub fn ignite(&self) -> Result<Option<Position>> {
        let forest = self.forest()?;
        let ignited = forest.lock().simulation.ignite();
        match ignited {
            Some(pos) => info!(row = pos.row, col = pos.col, "Fire started"),
            None => warn!("No trees to ignite"),
        }
        Ok(ignited)
    }

    /// Advance exactly one step and record it
    pub fn step(&self) -> Result<StepReport> {
        let forest = self.forest()?;
        let mut state = forest.lock();
        let report = state.simulation.step();
        state.history.record(&report);
        if let Some(observer) = &self.observer {
            observer(&report, state.simulation.grid());
        }
        Ok(report)
    }

    /// Start the auto-run loop. Returns `false` if one is already running.
    pub fn start_run(&mut self) -> Result<bool> {
        let forest = self.forest()?.clone();
        if self.is_running() {
            return Ok(false);
        }

        let period = Duration::from_millis(self.run_config.step_interval_ms);
        self.auto_run = Some(AutoRun::spawn(
            forest,
            period,
            self.run_config.max_steps,
            self.observer.clone(),
        ));
        Ok(true)
    }

    /// Cancel the auto-run loop, if any, and wait for it to settle
    pub async fn stop_run(&mut self) -> Option<RunOutcome> {
        let run = self.auto_run.take()?;
        Some(run.stop().await)
    }

    /// Start the loop when idle, stop it when running
    pub async fn toggle_run(&mut self) -> Result<()> {
        if self.is_running() {
            self.stop_run().await;
        } else {
            self.start_run()?;
        }
        Ok(())
    }

    /// Wait for the auto-run loop to end on its own
    pub async fn wait_for_run(&mut self) -> Option<RunOutcome> {
        let run = self.auto_run.take()?;
        Some(run.wait().await)
    }

    pub fn is_running(&self) -> bool {
        self.auto_run.as_ref().is_some_and(|run| !run.is_finished())
    }

    /// Token that cancels the current auto-run between steps
    pub fn run_cancellation(&self) -> Option<CancellationToken> {
        self.auto_run.as_ref().map(AutoRun::cancellation_token)
    }

    pub fn has_active_fire(&self) -> Result<bool> {
        Ok(self.forest()?.lock().simulation.has_active_fire())
    }

    /// Consistent copy of the grid between steps
    pub fn snapshot(&self) -> Result<Grid> {
        Ok(self.forest()?.lock().simulation.grid().clone())
    }

    pub fn history(&self) -> Result<History> {
        Ok(self.forest()?.lock().history.clone())
    }

    /// Drop the accumulated chart series without touching the grid
    pub fn clear_history(&self) -> Result<()> {
        self.forest()?.lock().history.clear();
        Ok(())
    }

    fn forest(&self) -> Result<&SharedForest> {
        self.forest.as_ref().ok_or(Error::NoSimulation)
    }
}
