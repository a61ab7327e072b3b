//! Step engine that advances a forest grid.

use crate::grid::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, trace};
use wildfire_core::{CellState, ForestConfig, Position, Result, StepReport};

pub struct Simulation {
    grid: Grid,
    rng: ChaCha8Rng,
    time_step: u64,
}

impl Simulation {
    /// Bind an existing grid. `seed` drives later ignitions.
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            rng: ChaCha8Rng::seed_from_u64(seed),
            time_step: 0,
        }
    }

    /// Construct, seed and bind a grid from configuration
    pub fn from_config(config: &ForestConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut grid = Grid::new(config.size)?;
        grid.plant_trees(config.tree_count, &mut rng);

        info!(
            size = config.size,
            trees = grid.count(CellState::Tree),
            seed,
            "Generated forest"
        );

        Ok(Self {
            grid,
            rng,
            time_step: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Set a random tree on fire using the simulation's rng
    pub fn ignite(&mut self) -> Option<Position> {
        self.grid.ignite_random_tree(&mut self.rng)
    }

    pub fn has_active_fire(&self) -> bool {
        self.grid.has_fire()
    }

    /// Advance the grid by one time unit.
    ///
    /// Every cell's next state is read from the pre-step snapshot and written
    /// into a fresh matrix, which then replaces the grid in one move.
    pub fn step(&mut self) -> StepReport {
        let next: Vec<CellState> = self
            .grid
            .iter()
            .map(|(pos, state)| self.next_state(pos, state))
            .collect();

        let had_fire = self.grid.has_fire();
        self.grid.replace_cells(next);
        self.time_step += 1;

        let counts = self.grid.census();
        let report = StepReport {
            time_step: self.time_step,
            trees_remaining: counts.trees,
            trees_burned: counts.ash,
        };

        trace!(
            time_step = report.time_step,
            trees_remaining = report.trees_remaining,
            trees_burned = report.trees_burned,
            burning = counts.fire,
            "Step complete"
        );

        if had_fire && counts.fire == 0 {
            info!(
                time_step = report.time_step,
                trees_remaining = report.trees_remaining,
                trees_burned = report.trees_burned,
                "🔥 Fire extinguished"
            );
        }

        report
    }

    /// Step until no fire remains or `max_steps` steps have run
    #[instrument(skip(self), fields(start = self.time_step))]
    pub fn run_until_extinguished(&mut self, max_steps: u64) -> Vec<StepReport> {
        let mut reports = Vec::new();
        while self.has_active_fire() && (reports.len() as u64) < max_steps {
            reports.push(self.step());
        }

        debug!(steps = reports.len(), burning = self.has_active_fire(), "Run finished");
        reports
    }

    fn next_state(&self, pos: Position, state: CellState) -> CellState {
        match state {
            CellState::Fire => CellState::Ash,
            CellState::Tree => {
                let catches = self
                    .grid
                    .orthogonal_neighbors(pos)
                    .iter()
                    .any(|&n| self.grid.get(n) == CellState::Fire);
                if catches {
                    CellState::Fire
                } else {
                    CellState::Tree
                }
            }
            CellState::Empty | CellState::Ash => state,
        }
    }
}
