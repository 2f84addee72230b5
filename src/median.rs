//! Running median over a stream of amounts with constant memory.
//!
//! Two bounded heaps straddle the median: `lower` holds the smaller half with
//! its maximum at the root, `upper` the larger half with its minimum at the
//! root. After every insertion each side is cut back to the [`RETAIN`] values
//! nearest the split, so a group never grows no matter how many contributions
//! it receives. The median is exact while neither side has to answer from a
//! value it already dropped; long skewed streams can drift. `count` and
//! `total` are tracked separately and are always exact.

use crate::heap::{BoundedHeap, Orientation, RETAIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Balanced,
    /// `lower` logically holds one more value than `upper`.
    LowerHeavy,
}

#[derive(Debug, Clone)]
pub struct RunningMedian {
    lower: BoundedHeap,
    upper: BoundedHeap,
    parity: Parity,
    count: u64,
    total: f64,
    median: f64,
}

impl Default for RunningMedian {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningMedian {
    pub const fn new() -> Self {
        Self {
            lower: BoundedHeap::new(Orientation::Max),
            upper: BoundedHeap::new(Orientation::Min),
            parity: Parity::Balanced,
            count: 0,
            total: 0.0,
            median: 0.0,
        }
    }

    pub fn add(&mut self, value: f64) {
        let below = matches!(self.lower.peek(), Some(top) if value < top);
        match self.parity {
            Parity::Balanced => {
                if below || self.lower.is_empty() {
                    self.lower.push(value);
                } else {
                    let moved = self.upper.push_pop(value);
                    self.lower.push(moved);
                }
                self.parity = Parity::LowerHeavy;
            }
            Parity::LowerHeavy => {
                if below {
                    let moved = self.lower.push_pop(value);
                    self.upper.push(moved);
                } else {
                    self.upper.push(value);
                }
                self.parity = Parity::Balanced;
            }
        }
        self.lower.truncate(RETAIN);
        self.upper.truncate(RETAIN);

        self.count += 1;
        self.total += value;
        self.median = self.boundary_median();
    }

    fn boundary_median(&self) -> f64 {
        match (self.parity, self.lower.peek(), self.upper.peek()) {
            (Parity::Balanced, Some(low), Some(high)) => (low + high) / 2.0,
            (_, Some(low), _) => low,
            _ => 0.0,
        }
    }

    /// Median estimate after the latest `add`; `0.0` before any value.
    #[inline]
    pub fn median(&self) -> f64 {
        self.median
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
