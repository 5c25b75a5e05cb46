use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Result, metrics::Metric};

/// Whether a final solution may use inverse notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NissPolicy {
    #[default]
    Forbid,
    Allow,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest final solution that still scores.
    pub max_moves: usize,
    pub niss: NissPolicy,
    /// Metric used when none is asked for.
    pub default_metric: Metric,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_moves: 80,
            niss: NissPolicy::Forbid,
            default_metric: Metric::Htm,
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// If the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<EngineConfig> {
        Ok(toml::from_str(text)?)
    }

    /// Reads the configuration at `path`, or the defaults if there is no file.
    ///
    /// # Errors
    ///
    /// If the file exists but cannot be read or is not a valid configuration.
    pub fn load(path: &Path) -> Result<EngineConfig> {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(EngineConfig::default());
        }

        let config = EngineConfig::from_toml_str(&fs::read_to_string(path)?)?;
        debug!("Loaded {config:?} from {}", path.display());

        Ok(config)
    }
}
