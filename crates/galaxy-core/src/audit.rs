//! Consistency pass over an accepted star table
//!
//! Nothing here can fail a scan: duplicate names are normal in the source
//! data and are only reported.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::star::StarRecord;

/// Inclusive min/max of one coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    fn new(value: i32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn include(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateBounds {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

/// A name carried by more than one star
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub star_count: usize,
    /// Most frequent first, then by name
    pub duplicates: Vec<DuplicateName>,
    /// `None` for an empty table
    pub bounds: Option<CoordinateBounds>,
}

impl AuditReport {
    /// Emit the report through tracing
    pub fn log(&self) {
        if let Some(first) = self.duplicates.first() {
            warn!(
                "Warning - {} duplicate star names found (e.g., '{}' appears {} times)",
                self.duplicates.len(),
                first.name,
                first.count
            );
        }

        if let Some(b) = &self.bounds {
            info!(
                "Coordinate ranges - X:[{},{}] Y:[{},{}] Z:[{},{}]",
                b.x.min, b.x.max, b.y.min, b.y.max, b.z.min, b.z.max
            );
        }
    }
}

/// Group stars by name and compute per-axis coordinate ranges
pub fn audit(stars: &[StarRecord]) -> AuditReport {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for star in stars {
        *counts.entry(star.name.as_str()).or_default() += 1;
    }

    let mut duplicates: Vec<DuplicateName> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(name, count)| DuplicateName {
            name: name.to_string(),
            count,
        })
        .collect();
    duplicates.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let bounds = stars.split_first().map(|(first, rest)| {
        let mut bounds = CoordinateBounds {
            x: AxisRange::new(first.x),
            y: AxisRange::new(first.y),
            z: AxisRange::new(first.z),
        };
        for star in rest {
            bounds.x.include(star.x);
            bounds.y.include(star.y);
            bounds.z.include(star.z);
        }
        bounds
    });

    AuditReport {
        star_count: stars.len(),
        duplicates,
        bounds,
    }
}
