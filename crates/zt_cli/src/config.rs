//! TOML configuration for the `zt` command line tool.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use zt_math::{ExtractBudget, DEFAULT_MAX_NODES_CREATED};

/// Parameters of the step-response demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Sample period `T`.
    pub sample_period: f64,
    /// Time constant of the lag, `tau = RC`.
    pub tau: f64,
    pub samples: usize,
    /// Input is 1 before this sample index and 0 from it on.
    pub step_off: usize,
    /// Characters drawn for an output of 1.0.
    pub bar_width: f64,
    pub bar_char: char,
    /// Extraction node budget; 0 disables it.
    pub max_nodes_created: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sample_period: 1.0,
            tau: 20.0,
            samples: 100,
            step_off: 50,
            bar_width: 100.0,
            bar_char: '|',
            max_nodes_created: DEFAULT_MAX_NODES_CREATED,
        }
    }
}

impl DemoConfig {
    /// Read `path`, falling back to defaults when it is missing or malformed.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        "error parsing config file: {e}. Using defaults."
                    ),
                },
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    "error reading config file: {e}. Using defaults."
                ),
            }
        } else {
            tracing::warn!(path = %path.display(), "config file not found. Using defaults.");
        }
        Self::default()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut file = fs::File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn budget(&self) -> ExtractBudget {
        ExtractBudget::with_max_nodes(self.max_nodes_created)
    }

    /// Input sample `i` of the pulse.
    pub fn input_at(&self, i: usize) -> f64 {
        if i < self.step_off {
            1.0
        } else {
            0.0
        }
    }
}
