//! Landmark lookup from the save's `Sectors.yaml`
//!
//! Only the first solar system's name is used. Everything else in the file is
//! ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
struct SectorsFile {
    #[serde(rename = "SolarSystems", default)]
    solar_systems: Vec<SolarSystem>,
}

#[derive(Debug, Deserialize)]
struct SolarSystem {
    #[serde(rename = "Name", default)]
    name: Option<String>,
}

/// Parse sectors content and return the first solar system's name.
///
/// Returns `Ok(None)` when there are no solar systems or the first one has
/// an empty name.
pub fn parse_landmark(content: &str) -> Result<Option<String>> {
    let sectors: Option<SectorsFile> = serde_yaml::from_str(content)?;
    let landmark = sectors
        .unwrap_or_default()
        .solar_systems
        .into_iter()
        .next()
        .and_then(|system| system.name)
        .filter(|name| !name.trim().is_empty());
    Ok(landmark)
}

/// Read the landmark from a sectors file.
///
/// A missing file yields `Ok(None)`; other I/O and YAML errors are returned.
pub fn read_landmark<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let err = Error::from(e);
            if err.is_not_found() {
                debug!("No sectors file at {}", path.display());
                return Ok(None);
            }
            return Err(err);
        }
    };
    parse_landmark(&content)
}

/// Like [`read_landmark`], but any failure is logged and treated as absent
pub fn load_landmark<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();
    match read_landmark(path) {
        Ok(landmark) => landmark,
        Err(e) => {
            warn!("Could not read landmark from {}: {}", path.display(), e);
            None
        }
    }
}
