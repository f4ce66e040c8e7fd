//! CLI argument parsing for casa.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Color theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Parser, Debug)]
#[command(name = "casa")]
#[command(about = "Browse real-estate listings and watch scrape jobs in the terminal")]
pub struct Args {
    /// Listing seed file (JSON array)
    #[arg(long, default_value = "data/listings.json")]
    pub listings: Utf8PathBuf,

    /// Scrape process seed file (JSON array)
    #[arg(long, default_value = "data/processes.json")]
    pub processes: Utf8PathBuf,

    /// Process tick interval in milliseconds
    #[arg(long, default_value = "1100")]
    pub tick_ms: u64,

    /// Delay before live data replaces the loading view, in milliseconds
    #[arg(long, default_value = "900")]
    pub loading_ms: u64,

    /// Directory that exported process logs are written to
    #[arg(long, default_value = ".")]
    pub export_dir: Utf8PathBuf,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    pub theme: ThemeChoice,

    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<Utf8PathBuf>,

    /// Don't reload the listings file when it changes
    #[arg(long)]
    pub no_watch: bool,
}

impl Args {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["casa"]);
        assert_eq!(args.listings, Utf8PathBuf::from("data/listings.json"));
        assert_eq!(args.tick_period(), Duration::from_millis(1100));
        assert_eq!(args.loading_delay(), Duration::from_millis(900));
        assert_eq!(args.theme, ThemeChoice::Dark);
        assert!(args.log_file.is_none());
        assert!(!args.no_watch);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "casa",
            "--tick-ms",
            "0",
            "--theme",
            "light",
            "--export-dir",
            "/tmp/logs",
            "--no-watch",
        ]);
        assert_eq!(args.tick_period(), Duration::from_millis(1));
        assert_eq!(args.theme, ThemeChoice::Light);
        assert_eq!(args.export_dir, Utf8PathBuf::from("/tmp/logs"));
        assert!(args.no_watch);
    }
}
