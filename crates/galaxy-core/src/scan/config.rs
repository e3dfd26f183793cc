use serde::Deserialize;

use crate::memory::layout::thresholds;

/// Tunables for one scan session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// A run is accepted only when it holds more than this many stars
    pub min_records: usize,
    /// Invalid entries in a row that end an array walk
    pub max_consecutive_failures: usize,
    /// Allocation budget for the no-relocation window
    pub no_relocation_budget: usize,
    /// Log progress every N regions
    pub progress_interval: usize,
    /// Bytes read per chunk while looking for the landmark
    pub chunk_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_records: thresholds::MIN_STAR_COUNT,
            max_consecutive_failures: thresholds::MAX_CONSECUTIVE_FAILURES,
            no_relocation_budget: thresholds::NO_RELOCATION_BUDGET,
            progress_interval: thresholds::REGION_PROGRESS_INTERVAL,
            chunk_size: thresholds::SCAN_CHUNK_SIZE,
        }
    }
}

impl ScanConfig {
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

/// Builder for ScanConfig
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    min_records: Option<usize>,
    max_consecutive_failures: Option<usize>,
    no_relocation_budget: Option<usize>,
    progress_interval: Option<usize>,
    chunk_size: Option<usize>,
}

impl ScanConfigBuilder {
    pub fn min_records(mut self, count: usize) -> Self {
        self.min_records = Some(count);
        self
    }

    pub fn max_consecutive_failures(mut self, count: usize) -> Self {
        self.max_consecutive_failures = Some(count);
        self
    }

    pub fn no_relocation_budget(mut self, bytes: usize) -> Self {
        self.no_relocation_budget = Some(bytes);
        self
    }

    pub fn progress_interval(mut self, regions: usize) -> Self {
        self.progress_interval = Some(regions);
        self
    }

    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    pub fn build(self) -> ScanConfig {
        let default = ScanConfig::default();
        ScanConfig {
            min_records: self.min_records.unwrap_or(default.min_records),
            max_consecutive_failures: self
                .max_consecutive_failures
                .unwrap_or(default.max_consecutive_failures)
                .max(1),
            no_relocation_budget: self
                .no_relocation_budget
                .unwrap_or(default.no_relocation_budget),
            progress_interval: self
                .progress_interval
                .unwrap_or(default.progress_interval)
                .max(1),
            chunk_size: self.chunk_size.unwrap_or(default.chunk_size).max(1),
        }
    }
}
