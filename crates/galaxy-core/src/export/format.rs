//! ExportFormat trait definition

use crate::star::StarRecord;

/// Trait for galaxy export formats
pub trait ExportFormat {
    /// Header line for the format, given the number of stars (if any)
    fn header(&self, star_count: usize) -> Option<String>;

    /// Format a single star
    fn format_row(&self, star: &StarRecord) -> String;

    /// Format a whole table, one line per star
    fn format_all(&self, stars: &[StarRecord]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header(stars.len()) {
            output.push_str(&header);
            output.push('\n');
        }
        for star in stars {
            output.push_str(&self.format_row(star));
            output.push('\n');
        }
        output
    }
}
