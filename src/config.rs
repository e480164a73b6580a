//! Command-line arguments and the resolved runtime configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// Catalog file name stored inside the application data directory.
const CATALOG_FILE_NAME: &str = "books.csv";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "book-catalog.log";

#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Keep a personal book catalog in a CSV file", long_about = None)]
pub struct Args {
    /// Catalog file to open (created on first save)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Where to write the log (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Paths and settings the binary runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub log_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Fill in every path the arguments leave out from the data directory in
    /// the user's home.
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = match (&args.file, &args.log_file) {
            (Some(_), Some(_)) => PathBuf::new(),
            _ => data_dir()?,
        };
        Ok(Self::with_data_dir(args, data_dir))
    }

    fn with_data_dir(args: Args, data_dir: PathBuf) -> Self {
        Self {
            catalog_path: args
                .file
                .unwrap_or_else(|| data_dir.join(CATALOG_FILE_NAME)),
            log_path: args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME)),
            log_filter: args.log_level,
        }
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_in_data_dir() {
        let args = Args::try_parse_from(["book-catalog"]).unwrap();
        let config = Config::with_data_dir(args, PathBuf::from("/home/reader/.book-catalog"));

        assert_eq!(
            config.catalog_path,
            PathBuf::from("/home/reader/.book-catalog/books.csv")
        );
        assert_eq!(
            config.log_path,
            PathBuf::from("/home/reader/.book-catalog/book-catalog.log")
        );
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "book-catalog",
            "--file",
            "shelf.csv",
            "--log-file",
            "shelf.log",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = Config::from_args(args).unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("shelf.csv"));
        assert_eq!(config.log_path, PathBuf::from("shelf.log"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn short_file_flag() {
        let args = Args::try_parse_from(["book-catalog", "-f", "mine.csv"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("mine.csv")));
    }
}
