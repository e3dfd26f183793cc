//! Optional TOML configuration for the extract command.
//!
//! ```toml
//! [scan]
//! min_records = 1000
//! chunk_size = 65536
//!
//! [paths]
//! output = "galaxy.csv"
//! sectors = "Sectors.yaml"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use galaxy_core::ScanConfig;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub scan: ScanConfig,
    pub paths: PathOverrides,
}

/// Overrides for the paths derived from the save root
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathOverrides {
    pub output: Option<PathBuf>,
    pub sectors: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `path` if given; failures fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }
}
