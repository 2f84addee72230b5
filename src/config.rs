use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// What the driver does with a line whose record cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MalformedPolicy {
    /// Log a warning and continue with the next line.
    #[default]
    Skip,
    /// Stop the run with an error.
    Abort,
}

/// Running medians of individual contributions by recipient and zip code,
/// and final medians by recipient and date.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// `|`-delimited contributions file, or `-` for standard input
    pub input: PathBuf,
    /// Output for running medians by recipient and zip code
    pub zip_output: PathBuf,
    /// Output for medians by recipient and date
    pub date_output: PathBuf,
    /// How to treat lines whose amount or layout cannot be parsed
    #[arg(long, value_enum, default_value_t = MalformedPolicy::Skip)]
    pub on_malformed: MalformedPolicy,
    /// Do not flush the zip output after every line
    #[arg(long)]
    pub no_flush: bool,
}

impl Config {
    pub fn new(
        input: impl Into<PathBuf>,
        zip_output: impl Into<PathBuf>,
        date_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            zip_output: zip_output.into(),
            date_output: date_output.into(),
            on_malformed: MalformedPolicy::default(),
            no_flush: false,
        }
    }
}
