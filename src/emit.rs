//! Output lines and the two sinks that write them.
//!
//! The zip stream is written one line at a time while input is still being
//! read; the date stream is written once, in order, after the input ends.

use std::fmt;
use std::io::{self, Write};

use crate::median::RunningMedian;

/// Rounds to the nearest whole dollar; exact halves go away from zero, so
/// refunds round the same way as contributions.
#[inline]
pub fn round_dollars(value: f64) -> i64 {
    value.round() as i64
}

/// Snapshot of one group, formatted as `recipient|group|median|count|total`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine<'a> {
    pub recipient_id: &'a str,
    pub group_key: &'a str,
    pub median: f64,
    pub count: u64,
    pub total: f64,
}

impl<'a> StatLine<'a> {
    pub fn new(recipient_id: &'a str, group_key: &'a str, stats: &RunningMedian) -> Self {
        Self {
            recipient_id,
            group_key,
            median: stats.median(),
            count: stats.count(),
            total: stats.total(),
        }
    }
}

impl fmt::Display for StatLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.recipient_id,
            self.group_key,
            round_dollars(self.median),
            self.count,
            round_dollars(self.total),
        )
    }
}

/// Streaming sink for the zip-code family.
pub struct ZipEmitter<W: Write> {
    out: W,
    flush_each: bool,
    written: u64,
}

impl<W: Write> ZipEmitter<W> {
    pub fn new(out: W, flush_each: bool) -> Self {
        Self {
            out,
            flush_each,
            written: 0,
        }
    }

    pub fn emit(&mut self, line: &StatLine<'_>) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        if self.flush_each {
            self.out.flush()?;
        }
        self.written += 1;
        Ok(())
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// One-shot sink for the date family.
pub struct DateEmitter<W: Write> {
    out: W,
}

impl<W: Write> DateEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes every line in the order given and returns how many were written.
    pub fn emit_all<'a, I>(mut self, lines: I) -> io::Result<(W, u64)>
    where
        I: IntoIterator<Item = StatLine<'a>>,
    {
        let mut written = 0;
        for line in lines {
            writeln!(self.out, "{line}")?;
            written += 1;
        }
        self.out.flush()?;
        Ok((self.out, written))
    }
}
