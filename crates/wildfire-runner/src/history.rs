//! In-memory time series fed to charting consumers.

use serde::Serialize;
use wildfire_core::StepReport;

pub const TREES_LEFT_LABEL: &str = "Trees Left";
pub const TREES_BURNED_LABEL: &str = "Trees Burned";

/// Two series indexed by time step: trees remaining and trees burned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    labels: Vec<u64>,
    trees_left: Vec<usize>,
    trees_burned: Vec<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one data point per series
    pub fn record(&mut self, report: &StepReport) {
        self.labels.push(report.time_step);
        self.trees_left.push(report.trees_remaining);
        self.trees_burned.push(report.trees_burned);
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.trees_left.clear();
        self.trees_burned.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    pub fn trees_left(&self) -> &[usize] {
        &self.trees_left
    }

    pub fn trees_burned(&self) -> &[usize] {
        &self.trees_burned
    }

    /// Named datasets in display order
    pub fn series(&self) -> [(&'static str, &[usize]); 2] {
        [
            (TREES_LEFT_LABEL, self.trees_left.as_slice()),
            (TREES_BURNED_LABEL, self.trees_burned.as_slice()),
        ]
    }

    pub fn last(&self) -> Option<StepReport> {
        let i = self.labels.len().checked_sub(1)?;
        Some(StepReport {
            time_step: self.labels[i],
            trees_remaining: self.trees_left[i],
            trees_burned: self.trees_burned[i],
        })
    }
}
