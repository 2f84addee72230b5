//! Running and final medians of individual campaign contributions.
//!
//! Each input line is a `|`-delimited contribution record. Records from
//! individuals are folded into two families of statistics keyed by recipient:
//! one by contributor zip code, reported after every accepted record, and one
//! by transaction date, reported once in sorted order after the input ends.
//! Every (recipient, group) pair keeps a [`RunningMedian`] with a fixed
//! memory footprint.
//!
//! ```
//! use donor_medians::Engine;
//!
//! let mut engine = Engine::new();
//! let line = "C001|N|TER|P|1|15|IND|DOE, J|LA|CA|902101234|X|Y|20170101|100.40|";
//! let zip = engine.ingest(line).unwrap().zip.unwrap();
//! assert_eq!(zip.to_string(), "C001|90210|100|1|100");
//!
//! let report = engine.finish();
//! let dates: Vec<String> = report.lines().map(|l| l.to_string()).collect();
//! assert_eq!(dates, ["C001|20170101|100|1|100"]);
//! ```

pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod group;
pub mod heap;
pub mod median;
pub mod record;
pub mod run;
pub mod source;

pub use config::{Config, MalformedPolicy};
pub use engine::{DateReport, Engine, Ingested};
pub use error::{RecordError, RunError};
pub use median::RunningMedian;
pub use run::{run, RunSummary};
