use tracing::{debug, info, trace};

use crate::error::Result;
use crate::memory::{AddressSpace, MemoryRegion, enumerate_regions};
use crate::runtime::{NoRelocationWindow, RelocationControl};
use crate::star::StarRecord;

use super::config::ScanConfig;
use super::pattern::{PatternScanner, SearchPattern};
use super::validator::RecordValidator;
use super::walker::{ArrayWalker, WalkOutcome};

/// Accepted star table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub stars: Vec<StarRecord>,
    /// Address of the first entry
    pub anchor: u64,
    /// Region the table was found in
    pub region: MemoryRegion,
}

/// Counters for one session, for progress and outcome reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub regions_total: usize,
    pub regions_scanned: usize,
    pub pattern_matches: usize,
    pub anchors: usize,
    pub rejected_walks: usize,
    pub relocation_paused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Found { result: ScanResult, stats: ScanStats },
    NotFound { stats: ScanStats },
}

impl ScanOutcome {
    pub fn stats(&self) -> &ScanStats {
        match self {
            ScanOutcome::Found { stats, .. } | ScanOutcome::NotFound { stats } => stats,
        }
    }

    pub fn into_result(self) -> Option<ScanResult> {
        match self {
            ScanOutcome::Found { result, .. } => Some(result),
            ScanOutcome::NotFound { .. } => None,
        }
    }
}

/// One best-effort scan of an address space for the star table
pub struct ScanSession<'a, M, C>
where
    M: AddressSpace + ?Sized,
    C: RelocationControl + ?Sized,
{
    memory: &'a M,
    runtime: &'a C,
    config: ScanConfig,
}

impl<'a, M, C> ScanSession<'a, M, C>
where
    M: AddressSpace + ?Sized,
    C: RelocationControl + ?Sized,
{
    pub fn new(memory: &'a M, runtime: &'a C, config: ScanConfig) -> Self {
        Self {
            memory,
            runtime,
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Encode `landmark` and scan for it
    pub fn run_landmark(&self, landmark: &str) -> Result<ScanOutcome> {
        let pattern = SearchPattern::from_landmark(landmark)?;
        Ok(self.run(&pattern))
    }

    /// Scan regions from the highest address down; the first accepted table
    /// ends the session.
    pub fn run(&self, pattern: &SearchPattern) -> ScanOutcome {
        let window = NoRelocationWindow::acquire(self.runtime, self.config.no_relocation_budget);

        let mut stats = ScanStats {
            relocation_paused: window.is_granted(),
            ..Default::default()
        };

        let regions = enumerate_regions(self.memory);
        stats.regions_total = regions.len();
        info!(
            "Scanning {} memory regions for '{}'...",
            regions.len(),
            pattern.landmark()
        );

        let mut scanner = PatternScanner::new(self.memory, pattern, self.config.chunk_size);
        let validator = RecordValidator::new(self.memory, pattern);
        let walker = ArrayWalker::new(
            self.memory,
            self.config.min_records,
            self.config.max_consecutive_failures,
        );
        let progress_interval = self.config.progress_interval.max(1);

        for (index, region) in regions.iter().enumerate() {
            stats.regions_scanned = index + 1;
            if stats.regions_scanned.is_multiple_of(progress_interval) {
                info!(
                    "Progress - scanned {}/{} regions...",
                    stats.regions_scanned, stats.regions_total
                );
            }

            let mut from = region.base;
            while let Some(hit) = scanner.find_next(region, from) {
                stats.pattern_matches += 1;
                from = hit + 1;

                let anchor = match validator.validate(region, hit) {
                    Ok(anchor) => anchor,
                    Err(rejection) => {
                        trace!("Rejected match at 0x{:X}: {:?}", hit, rejection);
                        continue;
                    }
                };
                stats.anchors += 1;
                info!(
                    "Found structure at 0x{:X} in region {}/{}",
                    anchor.start, stats.regions_scanned, stats.regions_total
                );

                match walker.walk(region, anchor.start) {
                    WalkOutcome::Accepted { stars, report } => {
                        info!(
                            "Successfully parsed {} stars ({} strides, stopped at {})",
                            stars.len(),
                            report.strides,
                            report.stop
                        );
                        return ScanOutcome::Found {
                            result: ScanResult {
                                stars,
                                anchor: anchor.start,
                                region: *region,
                            },
                            stats,
                        };
                    }
                    WalkOutcome::Rejected { report } => {
                        stats.rejected_walks += 1;
                        debug!(
                            "Discarded run at 0x{:X}: {} stars (stopped at {})",
                            anchor.start, report.decoded, report.stop
                        );
                    }
                }
            }
        }

        info!(
            "No star table found after scanning {} regions ({} matches, {} anchors)",
            stats.regions_scanned, stats.pattern_matches, stats.anchors
        );
        ScanOutcome::NotFound { stats }
    }
}
