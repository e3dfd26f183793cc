//! Galaxy CSV format
//!
//! ```text
//! 1500
//! 12,-40,7,Alpha
//! 3,9,-1,"Beta, Major"
//! ```
//!
//! The first line is the star count. A name is wrapped in double quotes only
//! when it contains a comma.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::star::StarRecord;

use super::format::ExportFormat;

/// CSV exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ExportFormat for CsvExporter {
    fn header(&self, star_count: usize) -> Option<String> {
        Some(star_count.to_string())
    }

    fn format_row(&self, star: &StarRecord) -> String {
        format!("{},{},{},{}", star.x, star.y, star.z, quote_name(&star.name))
    }
}

fn quote_name(name: &str) -> String {
    if name.contains(',') {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn unquote_name(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|inner| inner.contains(','))
        .unwrap_or(field)
}

/// Write the table to `path`, creating parent directories
pub fn write_galaxy_csv<P: AsRef<Path>>(path: P, stars: &[StarRecord]) -> Result<()> {
    let path = path.as_ref();
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, CsvExporter.format_all(stars))
    };

    write().map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} stars to {}", stars.len(), path.display());
    Ok(())
}

/// Parse the CSV form back into stars
pub fn parse_galaxy_csv(content: &str) -> Result<Vec<StarRecord>> {
    let malformed = |line: usize, message: String| Error::MalformedGalaxyFile { line, message };

    let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));
    let (_, count_line) = lines
        .next()
        .ok_or_else(|| malformed(1, "missing star count".to_string()))?;
    let expected: usize = count_line
        .trim()
        .parse()
        .map_err(|_| malformed(1, format!("invalid star count {:?}", count_line)))?;

    let mut stars = Vec::with_capacity(expected);
    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }

        let mut fields = line.splitn(4, ',');
        let mut coordinate = |axis: &str| -> Result<i32> {
            let field = fields
                .next()
                .ok_or_else(|| malformed(line_no, format!("missing {} coordinate", axis)))?;
            field
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid {} coordinate {:?}", axis, field)))
        };
        let x = coordinate("x")?;
        let y = coordinate("y")?;
        let z = coordinate("z")?;
        let name = fields
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| malformed(line_no, "missing name".to_string()))?;

        stars.push(StarRecord {
            x,
            y,
            z,
            name: unquote_name(name).to_string(),
        });
    }

    if stars.len() != expected {
        return Err(malformed(
            1,
            format!("header says {} stars, found {}", expected, stars.len()),
        ));
    }
    Ok(stars)
}

/// Read and parse a galaxy CSV file
pub fn read_galaxy_csv<P: AsRef<Path>>(path: P) -> Result<Vec<StarRecord>> {
    let content = fs::read_to_string(path)?;
    parse_galaxy_csv(&content)
}
