//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Forest generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Side length of the square grid
    pub size: i32,
    /// Number of trees to plant (clamped to size * size)
    pub tree_count: i64,
    /// Random seed for reproducibility; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            size: 50,
            tree_count: 1500,
            seed: None,
        }
    }
}

impl ForestConfig {
    /// Reject non-positive size or tree count before any grid is built
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(Error::InvalidDimension {
                size: i64::from(self.size),
            });
        }
        if self.tree_count <= 0 {
            return Err(Error::InvalidTreeCount {
                count: self.tree_count,
            });
        }
        Ok(())
    }
}

/// Auto-run loop parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Delay between automatic steps (milliseconds)
    pub step_interval_ms: u64,
    /// Upper bound on automatic steps; `None` runs until the fire is out
    pub max_steps: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 200,
            max_steps: None,
        }
    }
}

/// Top-level runner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub forest: ForestConfig,
    pub run: RunConfig,
}

impl RunnerConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&contents)?;
        debug!("Loaded runner config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.forest.validate()?;
        if self.run.step_interval_ms == 0 {
            return Err(Error::Config(
                "step_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let forest = ForestConfig::default();
        assert_eq!(forest.size, 50);
        assert_eq!(forest.tree_count, 1500);
        assert!(forest.seed.is_none());

        let run = RunConfig::default();
        assert_eq!(run.step_interval_ms, 200);
        assert!(run.max_steps.is_none());

        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive() {
        let config = ForestConfig {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidDimension { size: 0 })
        ));

        let config = ForestConfig {
            tree_count: -1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidTreeCount { count: -1 })
        ));

        let config = RunnerConfig {
            run: RunConfig {
                step_interval_ms: 0,
                max_steps: None,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{"forest": {"size": 8, "seed": 7}}"#).unwrap();
        assert_eq!(config.forest.size, 8);
        assert_eq!(config.forest.seed, Some(7));
        assert_eq!(config.forest.tree_count, 1500);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!(
            "wildfire-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"run": {"step_interval_ms": 50}}"#).unwrap();

        let config = RunnerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.run.step_interval_ms, 50);
        assert_eq!(config.forest, ForestConfig::default());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_missing_file() {
        let result = RunnerConfig::from_json_file("/nonexistent/wildfire.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
