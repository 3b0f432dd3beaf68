/// Draw settings, read from an optional JSON file and overridden from the command line
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_NAME_COLUMN: &str = "name";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a draw needs besides the two input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawConfig {
    pub name_column: String,
    /// Draw separately for each value of this column.
    pub group_column: Option<String>,
    /// Winners per draw, or per group when grouping.
    pub quota: Option<usize>,
    pub pinned: Vec<String>,
    /// Fixes the shuffle for a reproducible draw.
    pub seed: Option<u64>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            group_column: None,
            quota: None,
            pinned: Vec::new(),
            seed: None,
        }
    }
}

/// Values given on the command line. Anything set here wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name_column: Option<String>,
    pub group_column: Option<String>,
    pub quota: Option<usize>,
    pub pinned: Vec<String>,
    pub seed: Option<u64>,
}

impl DrawConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Apply command-line values. Pinned names from the command line are
    /// added to those from the file rather than replacing them.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(name_column) = overrides.name_column {
            self.name_column = name_column;
        }
        if overrides.group_column.is_some() {
            self.group_column = overrides.group_column;
        }
        if overrides.quota.is_some() {
            self.quota = overrides.quota;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.pinned.extend(overrides.pinned);
        self
    }
}
