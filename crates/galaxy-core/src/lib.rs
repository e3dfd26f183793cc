//! # galaxy-core
//!
//! Locates the host's star table in the memory of the running process and
//! extracts it.
//!
//! This crate provides:
//! - A fault-tolerant view of the process address space (Windows and Linux)
//! - Landmark-driven scanning for the fixed-stride star array
//! - A post-scan audit and the `galaxy.csv` export
//! - The one-shot extractor that ties a save game to a scan

pub mod audit;
pub mod error;
pub mod export;
pub mod extractor;
pub mod memory;
pub mod prelude;
pub mod runtime;
pub mod scan;
pub mod sectors;
pub mod star;

pub use audit::{AuditReport, AxisRange, CoordinateBounds, DuplicateName, audit};
pub use error::{Error, Result};
pub use export::{
    CsvExporter, ExportFormat, JsonExporter, parse_galaxy_csv, read_galaxy_csv, write_galaxy_csv,
};
pub use extractor::{
    ExtractionOutcome, Extractor, ExtractorConfig, ExtractorConfigBuilder, LogNotifier, Notifier,
    SkipReason,
};
pub use memory::{
    AddressSpace, AddressSpaceBounds, CurrentProcess, MemoryRegion, ReadFault, ReadMemory,
    ReadResult, RegionQuery,
};
pub use runtime::{HintError, NativeRuntime, NoRelocationWindow, RelocationControl};
pub use scan::{ScanConfig, ScanOutcome, ScanResult, ScanSession, ScanStats, SearchPattern};
pub use sectors::{load_landmark, parse_landmark, read_landmark};
pub use star::StarRecord;
