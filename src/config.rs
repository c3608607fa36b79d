use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BackgroundError, Result};

/// File name of the electricity mix table.
pub const ELECTRICITY_MIX_FILE: &str = "electricity_mixes.csv";
/// File name of the cumulative loss table.
pub const LOSSES_FILE: &str = "cumulative_electricity_losses.csv";

/// The reference tables bundled with the crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

// ---------------------------------------------------------------------------
// BackgroundConfig
// ---------------------------------------------------------------------------

/// Where the background reference tables live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Directory holding both tables.
    pub data_dir: PathBuf,
    pub electricity_mix_file: String,
    pub losses_file: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            data_dir: bundled_data_dir(),
            electricity_mix_file: ELECTRICITY_MIX_FILE.to_string(),
            losses_file: LOSSES_FILE.to_string(),
        }
    }
}

impl BackgroundConfig {
    /// Use `data_dir` with the default file names.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config. Fields left out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| BackgroundError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| BackgroundError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn locator(&self) -> ResourceLocator {
        ResourceLocator::new(&self.data_dir)
    }
}

// ---------------------------------------------------------------------------
// ResourceLocator
// ---------------------------------------------------------------------------

/// Resolves logical resource names to files under a data directory.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    root: PathBuf,
}

impl ResourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` under the data directory, which must be an existing file.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(BackgroundError::ResourceNotFound {
                name: name.to_string(),
                path,
            });
        }
        Ok(path)
    }
}

impl Default for ResourceLocator {
    fn default() -> Self {
        Self::new(bundled_data_dir())
    }
}
