use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{Config, MalformedPolicy};
use crate::emit::{DateEmitter, ZipEmitter};
use crate::engine::Engine;
use crate::error::RunError;
use crate::source::{self, LineSource};

/// Counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: u64,
    pub malformed: u64,
    pub zip_accepted: u64,
    pub date_accepted: u64,
    pub date_lines: u64,
    pub elapsed: Duration,
}

fn write_error(path: &Path, source: io::Error) -> RunError {
    RunError::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, RunError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| RunError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads every line of `config.input`, streams zip statistics as they change
/// and writes the sorted date statistics once the input is exhausted.
pub fn run(config: &Config) -> Result<RunSummary, RunError> {
    let start = Instant::now();
    let mut input = source::open(&config.input).map_err(|source| RunError::OpenInput {
        path: config.input.clone(),
        source,
    })?;
    let zip_out = create(&config.zip_output)?;
    let date_out = create(&config.date_output)?;
    info!(
        "reading {:?}, writing {:?} and {:?}",
        config.input, config.zip_output, config.date_output
    );

    let mut summary = process(config, input.as_mut(), zip_out, date_out)?;
    summary.elapsed = start.elapsed();

    info!(
        "{} lines, {} malformed, {} by zip, {} by date ({} date groups)",
        summary.lines, summary.malformed, summary.zip_accepted, summary.date_accepted, summary.date_lines
    );
    info!("--- {:?} ---", summary.elapsed);
    Ok(summary)
}

fn process(
    config: &Config,
    input: &mut dyn LineSource,
    zip_out: BufWriter<File>,
    date_out: BufWriter<File>,
) -> Result<RunSummary, RunError> {
    let mut zip = ZipEmitter::new(zip_out, !config.no_flush);
    let mut engine = Engine::new();
    let mut summary = RunSummary::default();
    loop {
        let line_no = summary.lines + 1;
        let line = match input.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => return Err(RunError::Read { line: line_no, source }),
        };
        summary.lines = line_no;

        let ingested = match engine.ingest(&line) {
            Ok(ingested) => ingested,
            Err(source) => match config.on_malformed {
                MalformedPolicy::Skip => {
                    warn!("line {line_no}: skipping malformed record: {source}");
                    summary.malformed += 1;
                    continue;
                }
                MalformedPolicy::Abort => {
                    return Err(RunError::Malformed { line: line_no, source });
                }
            },
        };

        if let Some(stat) = &ingested.zip {
            zip.emit(stat).map_err(|e| write_error(&config.zip_output, e))?;
        }
        if ingested.date {
            summary.date_accepted += 1;
        }
    }
    summary.zip_accepted = zip.written();
    zip.finish().map_err(|e| write_error(&config.zip_output, e))?;
    debug!("input exhausted after {} lines", summary.lines);

    let report = engine.finish();
    let (_, written) = DateEmitter::new(date_out)
        .emit_all(report.lines())
        .map_err(|e| write_error(&config.date_output, e))?;
    summary.date_lines = written;
    Ok(summary)
}
