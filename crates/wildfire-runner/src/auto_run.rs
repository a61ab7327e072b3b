//! Cancellable periodic stepping of a shared forest.

use crate::session::SharedForest;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};
use wildfire_core::StepReport;
use wildfire_world::Grid;

/// Callback handed every step report together with the post-step grid
pub type StepObserver = Arc<dyn Fn(&StepReport, &Grid) + Send + Sync>;

/// Why an auto-run loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No fire left after the given step
    Extinguished { time_step: u64 },
    /// Step limit reached while fire was still burning
    StepLimit { time_step: u64 },
    /// Stopped on request between steps
    Cancelled,
    /// The task panicked or was aborted
    Aborted,
}

/// Handle to a running auto-step task
pub struct AutoRun {
    token: CancellationToken,
    handle: JoinHandle<RunOutcome>,
}

impl AutoRun {
    /// Spawn a task that steps `forest` once per `period` until the fire is out,
    /// `max_steps` is reached or the run is cancelled. The first step happens one
    /// period after spawning.
    pub fn spawn(
        forest: SharedForest,
        period: Duration,
        max_steps: Option<u64>,
        observer: Option<StepObserver>,
    ) -> Self {
        let token = CancellationToken::new();
        let handle = tokio::spawn(run_loop(
            forest,
            period,
            max_steps,
            observer,
            token.clone(),
        ));
        Self { token, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Token that stops the loop at its next await point
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Request cancellation and wait for the in-flight step, if any, to finish
    pub async fn stop(self) -> RunOutcome {
        self.token.cancel();
        self.wait().await
    }

    /// Wait for the loop to end on its own
    pub async fn wait(self) -> RunOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Auto-run task failed: {}", e);
                RunOutcome::Aborted
            }
        }
    }
}

#[instrument(skip(forest, observer, token))]
async fn run_loop(
    forest: SharedForest,
    period: Duration,
    max_steps: Option<u64>,
    observer: Option<StepObserver>,
    token: CancellationToken,
) -> RunOutcome {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut steps: u64 = 0;

    info!("Auto-run started");

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!(steps, "Auto-run cancelled");
                return RunOutcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        // The lock is held for exactly one step and released before the next await
        let (report, burning) = {
            let mut state = forest.lock();
            let report = state.simulation.step();
            state.history.record(&report);
            if let Some(observer) = &observer {
                observer(&report, state.simulation.grid());
            }
            (report, state.simulation.has_active_fire())
        };
        steps += 1;

        debug!(
            time_step = report.time_step,
            trees_remaining = report.trees_remaining,
            trees_burned = report.trees_burned,
            "Auto step"
        );

        if !burning {
            info!(steps, time_step = report.time_step, "Auto-run stopped: fire is out");
            return RunOutcome::Extinguished {
                time_step: report.time_step,
            };
        }

        if max_steps.is_some_and(|max| steps >= max) {
            info!(steps, time_step = report.time_step, "Auto-run stopped: step limit");
            return RunOutcome::StepLimit {
                time_step: report.time_step,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ForestState;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wildfire_core::{CellState, Position};
    use wildfire_world::Simulation;

    fn line_forest(len: i32) -> SharedForest {
        let mut grid = Grid::new(len).unwrap();
        for col in 0..len {
            grid.set(Position::new(0, col), CellState::Tree);
        }
        grid.set(Position::new(0, 0), CellState::Fire);
        Arc::new(Mutex::new(ForestState::new(Simulation::new(grid, 0))))
    }

    #[tokio::test]
    async fn test_runs_until_extinguished() {
        let forest = line_forest(6);
        let run = AutoRun::spawn(forest.clone(), Duration::from_millis(1), None, None);

        let outcome = run.wait().await;
        let state = forest.lock();
        assert_eq!(
            outcome,
            RunOutcome::Extinguished {
                time_step: state.simulation.time_step()
            }
        );
        assert!(!state.simulation.has_active_fire());
        assert_eq!(state.history.len() as u64, state.simulation.time_step());
        assert_eq!(state.simulation.grid().count(CellState::Ash), 6);
    }

    #[tokio::test]
    async fn test_step_limit() {
        let forest = line_forest(20);
        let run = AutoRun::spawn(forest.clone(), Duration::from_millis(1), Some(3), None);

        assert_eq!(run.wait().await, RunOutcome::StepLimit { time_step: 3 });
        assert!(forest.lock().simulation.has_active_fire());
    }

    #[tokio::test]
    async fn test_cancel_stops_between_steps() {
        let forest = line_forest(30);
        let run = AutoRun::spawn(forest.clone(), Duration::from_secs(60), None, None);

        assert_eq!(run.stop().await, RunOutcome::Cancelled);
        let state = forest.lock();
        assert_eq!(state.simulation.time_step(), 0);
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_observer_sees_every_step() {
        let forest = line_forest(5);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let observer: StepObserver = Arc::new(move |report: &StepReport, grid: &Grid| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert_eq!(grid.count(CellState::Ash), report.trees_burned);
        });

        let run = AutoRun::spawn(forest.clone(), Duration::from_millis(1), None, Some(observer));
        assert!(matches!(run.wait().await, RunOutcome::Extinguished { .. }));

        assert_eq!(
            calls.load(Ordering::SeqCst) as u64,
            forest.lock().simulation.time_step()
        );
    }
}
