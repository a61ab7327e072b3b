//! Population statistics reported by the step engine.

use crate::CellState;
use serde::{Deserialize, Serialize};

/// Per-state cell tally of a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub empty: usize,
    pub trees: usize,
    pub fire: usize,
    pub ash: usize,
}

impl PopulationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one cell
    pub fn record(&mut self, state: CellState) {
        match state {
            CellState::Empty => self.empty += 1,
            CellState::Tree => self.trees += 1,
            CellState::Fire => self.fire += 1,
            CellState::Ash => self.ash += 1,
        }
    }

    pub fn get(&self, state: CellState) -> usize {
        match state {
            CellState::Empty => self.empty,
            CellState::Tree => self.trees,
            CellState::Fire => self.fire,
            CellState::Ash => self.ash,
        }
    }

    /// Total number of cells tallied
    pub fn total(&self) -> usize {
        self.empty + self.trees + self.fire + self.ash
    }
}

impl FromIterator<CellState> for PopulationCounts {
    fn from_iter<I: IntoIterator<Item = CellState>>(iter: I) -> Self {
        let mut counts = Self::new();
        for state in iter {
            counts.record(state);
        }
        counts
    }
}

/// Outcome of a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Clock value after the step
    pub time_step: u64,
    /// Cells in `Tree` state after the step
    pub trees_remaining: usize,
    /// Cells in `Ash` state after the step
    pub trees_burned: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_iter() {
        let counts: PopulationCounts = [
            CellState::Tree,
            CellState::Tree,
            CellState::Fire,
            CellState::Empty,
            CellState::Ash,
            CellState::Ash,
            CellState::Ash,
        ]
        .into_iter()
        .collect();

        assert_eq!(counts.trees, 2);
        assert_eq!(counts.fire, 1);
        assert_eq!(counts.empty, 1);
        assert_eq!(counts.ash, 3);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.get(CellState::Ash), 3);
    }

    #[test]
    fn test_step_report_json() {
        let report = StepReport {
            time_step: 3,
            trees_remaining: 10,
            trees_burned: 4,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"time_step":3,"trees_remaining":10,"trees_burned":4}"#
        );
    }
}
