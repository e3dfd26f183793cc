//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "galaxy-extract")]
#[command(about = "Extract the star table from process memory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan this process for the star table and write galaxy.csv
    Extract {
        /// Root directory of the active save
        #[arg(short, long, env = "GALAXY_SAVE_DIR")]
        save_dir: PathBuf,

        /// Landmark star name (default: first solar system in Sectors.yaml)
        #[arg(short, long)]
        landmark: Option<String>,

        /// TOML file with [scan] and [paths] tables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Plant a synthetic star table in the heap and scan for it
    Selftest {
        /// Number of stars to plant
        #[arg(long, default_value_t = 1500)]
        stars: usize,

        /// Name of the first star
        #[arg(long, default_value = "Selftest Prime")]
        landmark: String,
    },
    /// Audit a galaxy.csv file
    Inspect {
        /// Path to galaxy.csv
        file: PathBuf,

        /// Print the stars as NDJSON instead of the audit
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from([
            "galaxy-extract",
            "extract",
            "--save-dir",
            "saves/one",
            "--landmark",
            "Sol",
        ])
        .unwrap();
        match cli.command {
            Command::Extract {
                save_dir,
                landmark,
                config,
            } => {
                assert_eq!(save_dir, PathBuf::from("saves/one"));
                assert_eq!(landmark.as_deref(), Some("Sol"));
                assert!(config.is_none());
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_parse_selftest_defaults() {
        let cli = Cli::try_parse_from(["galaxy-extract", "selftest"]).unwrap();
        match cli.command {
            Command::Selftest { stars, landmark } => {
                assert_eq!(stars, 1500);
                assert_eq!(landmark, "Selftest Prime");
            }
            _ => panic!("expected selftest"),
        }
    }

    #[test]
    fn test_parse_inspect_json() {
        let cli = Cli::try_parse_from(["galaxy-extract", "inspect", "galaxy.csv", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect { json: true, .. }));
    }
}
