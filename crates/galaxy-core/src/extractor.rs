//! One-shot galaxy extraction for a save game.
//!
//! The extractor wires the collaborators around a [`ScanSession`]:
//! - an idempotency gate on the output file
//! - the landmark from `Sectors/Sectors.yaml`
//! - timing, auditing and the CSV write of an accepted table
//!
//! ## Example
//!
//! ```ignore
//! use galaxy_core::{CurrentProcess, Extractor, ExtractorConfig, LogNotifier, NativeRuntime};
//!
//! let config = ExtractorConfig::builder().save_root("Saves/Slot1").build();
//! let process = CurrentProcess::open()?;
//! let outcome = Extractor::new(config).run(&process, &NativeRuntime, &LogNotifier)?;
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use strum::IntoStaticStr;
use tracing::{info, warn};

use crate::audit::{AuditReport, audit};
use crate::error::Result;
use crate::export::write_galaxy_csv;
use crate::memory::AddressSpace;
use crate::runtime::RelocationControl;
use crate::scan::{ScanConfig, ScanOutcome, ScanSession, ScanStats, SearchPattern};
use crate::sectors::load_landmark;

const OUTPUT_RELATIVE: &str = "Content/Mods/GalaxyExtract/galaxy.csv";
const SECTORS_RELATIVE: &str = "Sectors/Sectors.yaml";

/// Receives human-readable progress and outcome text
pub trait Notifier {
    fn display_message(&self, message: &str);
    fn display_warning(&self, message: &str);
}

/// Notifier that routes everything to tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn display_message(&self, message: &str) {
        info!("{}", message);
    }

    fn display_warning(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Configuration for one extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Root directory of the active save
    pub save_root: PathBuf,
    /// Where the galaxy table is written
    pub output_path: PathBuf,
    /// Where the landmark is read from
    pub sectors_path: PathBuf,
    /// Landmark to use instead of the sectors file
    pub landmark: Option<String>,
    pub scan: ScanConfig,
}

impl ExtractorConfig {
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }

    /// Default config for a save root
    pub fn for_save<P: Into<PathBuf>>(save_root: P) -> Self {
        Self::builder().save_root(save_root).build()
    }
}

/// Builder for ExtractorConfig
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfigBuilder {
    save_root: Option<PathBuf>,
    output_path: Option<PathBuf>,
    sectors_path: Option<PathBuf>,
    landmark: Option<String>,
    scan: Option<ScanConfig>,
}

impl ExtractorConfigBuilder {
    pub fn save_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.save_root = Some(path.into());
        self
    }

    /// Override the derived output path
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Override the derived sectors path
    pub fn sectors_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.sectors_path = Some(path.into());
        self
    }

    pub fn landmark<S: Into<String>>(mut self, landmark: S) -> Self {
        self.landmark = Some(landmark.into());
        self
    }

    pub fn scan(mut self, scan: ScanConfig) -> Self {
        self.scan = Some(scan);
        self
    }

    pub fn build(self) -> ExtractorConfig {
        let save_root = self.save_root.unwrap_or_default();
        ExtractorConfig {
            output_path: self
                .output_path
                .unwrap_or_else(|| save_root.join(OUTPUT_RELATIVE)),
            sectors_path: self
                .sectors_path
                .unwrap_or_else(|| save_root.join(SECTORS_RELATIVE)),
            save_root,
            landmark: self.landmark,
            scan: self.scan.unwrap_or_default(),
        }
    }
}

/// Why an extraction did not scan
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SkipReason {
    /// The output file already exists
    AlreadyExtracted,
    /// No usable landmark in the sectors file
    MissingLandmark,
    /// The landmark cannot be turned into a search pattern
    InvalidLandmark(String),
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ExtractionOutcome {
    Skipped(SkipReason),
    NotFound {
        elapsed: Duration,
        stats: ScanStats,
    },
    Succeeded {
        count: usize,
        elapsed: Duration,
        audit: AuditReport,
        path: PathBuf,
    },
}

impl ExtractionOutcome {
    /// Stable label: "skipped", "not-found" or "succeeded"
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Run the extraction against `memory`.
    ///
    /// Only a failure to persist a found table is an error.
    pub fn run<M, C>(
        &self,
        memory: &M,
        runtime: &C,
        notifier: &dyn Notifier,
    ) -> Result<ExtractionOutcome>
    where
        M: AddressSpace + ?Sized,
        C: RelocationControl + ?Sized,
    {
        let output = &self.config.output_path;
        if output.exists() {
            info!("Galaxy already extracted to {}", output.display());
            return Ok(ExtractionOutcome::Skipped(SkipReason::AlreadyExtracted));
        }

        let Some(landmark) = self.landmark() else {
            notifier.display_warning("Galaxy extraction skipped: no landmark star in sectors file");
            return Ok(ExtractionOutcome::Skipped(SkipReason::MissingLandmark));
        };

        let pattern = match SearchPattern::from_landmark(&landmark) {
            Ok(pattern) => pattern,
            Err(e) => {
                notifier.display_warning(&format!("Galaxy extraction skipped: {}", e));
                return Ok(ExtractionOutcome::Skipped(SkipReason::InvalidLandmark(
                    e.to_string(),
                )));
            }
        };

        notifier.display_message(&format!(
            "Extracting galaxy data (landmark '{}')...",
            landmark
        ));

        let started = Instant::now();
        let outcome =
            ScanSession::new(memory, runtime, self.config.scan.clone()).run(&pattern);
        let elapsed = started.elapsed();

        match outcome {
            ScanOutcome::NotFound { stats } => {
                notifier.display_warning(&format!(
                    "Galaxy data not found after scanning {} regions ({:.1}s)",
                    stats.regions_scanned,
                    elapsed.as_secs_f64()
                ));
                Ok(ExtractionOutcome::NotFound { elapsed, stats })
            }
            ScanOutcome::Found { result, .. } => {
                let report = audit(&result.stars);
                report.log();

                write_galaxy_csv(output, &result.stars).inspect_err(|e| {
                    notifier.display_warning(&format!("Galaxy extraction failed: {}", e));
                })?;

                notifier.display_message(&format!(
                    "Extracted {} stars in {:.1}s",
                    result.stars.len(),
                    elapsed.as_secs_f64()
                ));
                Ok(ExtractionOutcome::Succeeded {
                    count: result.stars.len(),
                    elapsed,
                    audit: report,
                    path: output.clone(),
                })
            }
        }
    }

    fn landmark(&self) -> Option<String> {
        match &self.config.landmark {
            Some(landmark) if !landmark.trim().is_empty() => Some(landmark.clone()),
            Some(_) => None,
            None => load_landmark(&self.config.sectors_path),
        }
    }
}
