use log::trace;

use crate::emit::StatLine;
use crate::error::RecordError;
use crate::group::{ByDate, ByZip, GroupPolicy, Grouped};
use crate::record::Contribution;

/// What one input line did to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<'s> {
    /// Updated zip-code group, present when the zip rules accepted the record.
    pub zip: Option<StatLine<'s>>,
    /// Whether the date rules accepted the record.
    pub date: bool,
}

/// Owns both statistic families for one pass over the input.
#[derive(Default)]
pub struct Engine {
    by_zip: Grouped<ByZip>,
    by_date: Grouped<ByDate>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `line` and folds it into every family that accepts it.
    ///
    /// A line that fails to parse leaves the engine untouched.
    pub fn ingest<'s>(&mut self, line: &'s str) -> Result<Ingested<'s>, RecordError> {
        let contribution = Contribution::parse(line)?;
        Ok(self.ingest_contribution(&contribution))
    }

    pub fn ingest_contribution<'s>(&mut self, contribution: &Contribution<'s>) -> Ingested<'s> {
        let zip = self
            .by_zip
            .offer(contribution)
            .map(|(key, stats)| StatLine::new(contribution.recipient_id, key, stats));
        let date = self.by_date.offer(contribution).is_some();
        if zip.is_none() && !date {
            trace!(
                "{} skipped by {} and {} rules",
                contribution.recipient_id,
                ByZip::NAME,
                ByDate::NAME
            );
        }
        Ingested { zip, date }
    }

    pub fn zip_groups(&self) -> &Grouped<ByZip> {
        &self.by_zip
    }

    pub fn date_groups(&self) -> &Grouped<ByDate> {
        &self.by_date
    }

    /// Ends the pass and yields the date family ordered by recipient, then date.
    pub fn finish(self) -> DateReport {
        DateReport {
            by_date: self.by_date,
        }
    }
}

/// Final date statistics, produced once the input is exhausted.
pub struct DateReport {
    by_date: Grouped<ByDate>,
}

impl DateReport {
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = StatLine<'_>> {
        self.by_date
            .sorted()
            .into_iter()
            .map(|(recipient, date, stats)| StatLine::new(recipient, date, stats))
    }
}
