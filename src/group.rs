//! Two-level index from recipient to group key to [`RunningMedian`].
//!
//! The zip-code and date statistics differ only in how a contribution is
//! keyed and which contributions qualify, so both share [`Grouped`] and pick
//! their behaviour through a [`GroupPolicy`].

use std::marker::PhantomData;

use ahash::RandomState;
use hashbrown::hash_map::EntryRef;
use hashbrown::HashMap;

use crate::median::RunningMedian;
use crate::record::{char_len, Contribution, DATE_LEN, ZIP_LEN};

type Index<V> = HashMap<String, V, RandomState>;

pub trait GroupPolicy {
    /// Column name used in log lines.
    const NAME: &'static str;

    /// Secondary key for `contribution`, or `None` when it does not qualify.
    fn key_of<'s>(contribution: &Contribution<'s>) -> Option<&'s str>;
}

/// Rules shared by both statistic families.
#[inline]
fn eligible(contribution: &Contribution<'_>) -> bool {
    contribution.is_individual() && !contribution.recipient_id.is_empty()
}

/// Groups by the contributor's five-digit zip code.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByZip;

impl GroupPolicy for ByZip {
    const NAME: &'static str = "zip_code";

    #[inline]
    fn key_of<'s>(contribution: &Contribution<'s>) -> Option<&'s str> {
        let zip = contribution.zip_code;
        (eligible(contribution) && char_len(zip) >= ZIP_LEN).then_some(zip)
    }
}

/// Groups by the eight-character transaction date string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByDate;

impl GroupPolicy for ByDate {
    const NAME: &'static str = "transaction_dt";

    #[inline]
    fn key_of<'s>(contribution: &Contribution<'s>) -> Option<&'s str> {
        let date = contribution.transaction_date;
        (eligible(contribution) && char_len(date) == DATE_LEN).then_some(date)
    }
}

pub struct Grouped<P> {
    recipients: Index<Index<RunningMedian>>,
    groups: usize,
    _policy: PhantomData<P>,
}

impl<P> Default for Grouped<P> {
    fn default() -> Self {
        Self {
            recipients: Index::default(),
            groups: 0,
            _policy: PhantomData,
        }
    }
}

impl<P: GroupPolicy> Grouped<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `contribution` into its group when the policy accepts it and
    /// returns the key together with the updated estimator.
    pub fn offer<'s>(
        &mut self,
        contribution: &Contribution<'s>,
    ) -> Option<(&'s str, &RunningMedian)> {
        let key = P::key_of(contribution)?;
        let median = self.record(
            contribution.recipient_id,
            key,
            contribution.transaction_amount,
        );
        Some((key, median))
    }

    pub fn record(&mut self, recipient_id: &str, group_key: &str, amount: f64) -> &RunningMedian {
        let groups = self.recipients.entry_ref(recipient_id).or_default();
        let median = match groups.entry_ref(group_key) {
            EntryRef::Occupied(entry) => entry.into_mut(),
            EntryRef::Vacant(entry) => {
                self.groups += 1;
                entry.insert(RunningMedian::new())
            }
        };
        median.add(amount);
        median
    }

    pub fn get(&self, recipient_id: &str, group_key: &str) -> Option<&RunningMedian> {
        self.recipients.get(recipient_id)?.get(group_key)
    }

    /// Number of distinct (recipient, group) pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups == 0
    }

    /// Every group, ordered by recipient and then by group key.
    pub fn sorted(&self) -> Vec<(&str, &str, &RunningMedian)> {
        let mut recipients = self.recipients.iter().collect::<Vec<_>>();
        recipients.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = Vec::with_capacity(self.groups);
        for (recipient, groups) in recipients {
            let mut keys = groups.iter().collect::<Vec<_>>();
            keys.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.extend(keys.into_iter().map(|(key, median)| (recipient.as_str(), key.as_str(), median)));
        }
        out
    }
}
