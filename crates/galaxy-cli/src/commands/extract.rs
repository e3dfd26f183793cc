//! Extract command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use galaxy_core::{
    CurrentProcess, ExtractionOutcome, Extractor, ExtractorConfig, LogNotifier, NativeRuntime,
    SkipReason,
};
use owo_colors::OwoColorize;

use super::print_audit;
use crate::config::CliConfig;

/// Run the extract command against this process
pub fn run(save_dir: PathBuf, landmark: Option<String>, config: Option<&Path>) -> Result<()> {
    let file_config = CliConfig::load_or_default(config);

    let mut builder = ExtractorConfig::builder()
        .save_root(save_dir)
        .scan(file_config.scan);
    if let Some(output) = file_config.paths.output {
        builder = builder.output_path(output);
    }
    if let Some(sectors) = file_config.paths.sectors {
        builder = builder.sectors_path(sectors);
    }
    if let Some(landmark) = landmark {
        builder = builder.landmark(landmark);
    }

    let extractor = Extractor::new(builder.build());
    let process = CurrentProcess::open()?;
    let outcome = extractor.run(&process, &NativeRuntime, &LogNotifier)?;

    match &outcome {
        ExtractionOutcome::Skipped(reason) => {
            let detail = match reason {
                SkipReason::AlreadyExtracted => format!(
                    "output already exists at {}",
                    extractor.output_path().display()
                ),
                SkipReason::MissingLandmark => "no landmark star available".to_string(),
                SkipReason::InvalidLandmark(e) => e.clone(),
            };
            println!("{}: {}", "Skipped".yellow(), detail);
        }
        ExtractionOutcome::NotFound { elapsed, stats } => {
            println!(
                "{}: scanned {} of {} regions in {:.1}s ({} pattern matches, {} rejected walks)",
                "Not found".red(),
                stats.regions_scanned,
                stats.regions_total,
                elapsed.as_secs_f64(),
                stats.pattern_matches,
                stats.rejected_walks
            );
        }
        ExtractionOutcome::Succeeded {
            count,
            elapsed,
            audit,
            path,
        } => {
            println!(
                "{}: {} stars in {:.1}s -> {}",
                "Succeeded".green(),
                count,
                elapsed.as_secs_f64(),
                path.display()
            );
            print_audit(audit);
        }
    }

    Ok(())
}
