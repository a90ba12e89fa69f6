//! Planner configuration, loadable from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults {
    use crate::grid::costs;
    use crate::potential::DEFAULT_BUCKET_CAPACITY;

    pub fn priority_increment() -> f32 {
        2.0 * costs::NEUTRAL as f32
    }

    pub fn path_step() -> f32 {
        0.5
    }

    pub fn bucket_capacity() -> usize {
        DEFAULT_BUCKET_CAPACITY
    }

    pub fn enabled() -> bool {
        true
    }
}

/// Error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// YAML did not parse into the expected structure
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Tunables of a [`crate::PotentialPlanner`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Priority-threshold step per bucket rotation
    #[serde(default = "defaults::priority_increment")]
    pub priority_increment: f32,

    /// Tracer advance per step, in cells. Half a cell keeps the
    /// interpolation stencil from jumping past a potential minimum.
    #[serde(default = "defaults::path_step")]
    pub path_step: f32,

    /// Capacity of each scheduler bucket; enqueues past it are dropped
    #[serde(default = "defaults::bucket_capacity")]
    pub bucket_capacity: usize,

    /// Treat unknown cells as traversable (at the highest non-lethal cost)
    #[serde(default = "defaults::enabled")]
    pub allow_unknown: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            priority_increment: defaults::priority_increment(),
            path_step: defaults::path_step(),
            bucket_capacity: defaults::bucket_capacity(),
            allow_unknown: true,
        }
    }
}

/// Full configuration file layout
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct NavConfig {
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerSettings,
}

impl NavConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize configuration to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::DEFAULT_BUCKET_CAPACITY;

    #[test]
    fn test_defaults() {
        let settings = PlannerSettings::default();
        assert_eq!(settings.priority_increment, 100.0);
        assert_eq!(settings.path_step, 0.5);
        assert_eq!(settings.bucket_capacity, DEFAULT_BUCKET_CAPACITY);
        assert!(settings.allow_unknown);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = NavConfig::from_yaml("planner:\n  path_step: 0.25\n").unwrap();
        assert_eq!(config.planner.path_step, 0.25);
        assert_eq!(config.planner.priority_increment, 100.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = NavConfig::from_yaml("{}").unwrap();
        assert_eq!(config.planner.bucket_capacity, DEFAULT_BUCKET_CAPACITY);
    }

    #[test]
    fn test_round_trip() {
        let config = NavConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = NavConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.planner.path_step, config.planner.path_step);
    }
}
