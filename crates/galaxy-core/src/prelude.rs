//! Prelude module for convenient imports
//!
//! ```ignore
//! use galaxy_core::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::export::ExportFormat;
pub use crate::extractor::{ExtractionOutcome, Extractor, ExtractorConfig, Notifier};
pub use crate::memory::{AddressSpace, CurrentProcess, ReadMemory, RegionQuery};
pub use crate::runtime::{NativeRuntime, RelocationControl};
pub use crate::scan::{ScanConfig, ScanOutcome, ScanSession};
pub use crate::star::StarRecord;
