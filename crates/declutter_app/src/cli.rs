use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "declutter")]
#[command(bin_name = "declutter")]
#[command(version)]
#[command(about = "Hide noise entries from a saved pull request timeline")]
pub struct Cli {
    /// Saved conversation page.
    pub page: PathBuf,

    /// Pages delivered by successive "Load more" clicks, in order.
    #[arg(long = "more", value_name = "NEXT_HTML")]
    pub more: Vec<PathBuf>,

    /// RON settings file; defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Extra phrase to hide, on top of the configured ones.
    #[arg(long = "phrase", value_name = "TEXT")]
    pub phrases: Vec<String>,

    /// URL the page is reported under.
    #[arg(long, default_value = "https://github.com/local/repo/pull/1")]
    pub url: String,

    /// Click the toggle once the timeline has settled.
    #[arg(long)]
    pub reveal: bool,

    /// Give up waiting for the timeline to settle after this long.
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log file written when `--log` is `file` or `both`.
    #[arg(long, value_name = "FILE", default_value = engine_logging::LOG_FILE_NAME)]
    pub log_file: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}
