//! JSON export format implementation

use serde_json::json;

use crate::star::StarRecord;

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self, _star_count: usize) -> Option<String> {
        None // NDJSON doesn't need a header
    }

    fn format_row(&self, star: &StarRecord) -> String {
        json!({
            "x": star.x,
            "y": star.y,
            "z": star.z,
            "name": star.name,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rows_parse_back() {
        let stars = vec![
            StarRecord {
                x: 1,
                y: -2,
                z: 3,
                name: "Beta, Major".to_string(),
            },
            StarRecord {
                x: 0,
                y: 0,
                z: 0,
                name: "Gamma".to_string(),
            },
        ];

        let output = JsonExporter.format_all(&stars);
        let parsed: Vec<StarRecord> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, stars);
    }
}
