//! Inspect command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use galaxy_core::{ExportFormat, JsonExporter, audit, read_galaxy_csv};

use super::print_audit;

/// Audit a galaxy file, or print it as NDJSON
pub fn run(file: &Path, json: bool) -> Result<()> {
    let stars = read_galaxy_csv(file)
        .with_context(|| format!("Failed to read galaxy file {}", file.display()))?;

    if json {
        print!("{}", JsonExporter.format_all(&stars));
    } else {
        println!("=== Galaxy File ===");
        println!("Path: {}", file.display());
        print_audit(&audit(&stars));
    }

    Ok(())
}
