//! Galaxy export formats
//!
//! - CSV (`galaxy.csv`): the persisted form handed to downstream tools
//! - NDJSON: for inspection and piping into other tooling

mod csv;
mod format;
mod json;

pub use csv::*;
pub use format::ExportFormat;
pub use json::JsonExporter;
