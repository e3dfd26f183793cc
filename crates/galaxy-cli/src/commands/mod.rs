//! CLI command implementations.

pub mod extract;
pub mod inspect;
pub mod selftest;

use galaxy_core::AuditReport;
use owo_colors::OwoColorize;

/// Print an audit report to stdout
pub(crate) fn print_audit(report: &AuditReport) {
    println!("Stars: {}", report.star_count.bold());

    match &report.bounds {
        Some(b) => {
            println!("Coordinate ranges:");
            println!("  X: [{}, {}]", b.x.min, b.x.max);
            println!("  Y: [{}, {}]", b.y.min, b.y.max);
            println!("  Z: [{}, {}]", b.z.min, b.z.max);
        }
        None => println!("Coordinate ranges: (empty table)"),
    }

    if report.duplicates.is_empty() {
        println!("Duplicate names: {}", "none".green());
    } else {
        println!(
            "Duplicate names: {}",
            report.duplicates.len().to_string().yellow()
        );
        for dup in report.duplicates.iter().take(10) {
            println!("  {:<40} x{}", dup.name, dup.count);
        }
        if report.duplicates.len() > 10 {
            println!("  ... and {} more", report.duplicates.len() - 10);
        }
    }
}
