use std::fmt;

/// Number of values each side of a [`RunningMedian`](crate::median::RunningMedian) keeps.
pub const RETAIN: usize = 3;

// One slot of headroom: a side may briefly hold RETAIN + 1 values between
// rebalancing and truncation.
const SLOTS: usize = RETAIN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Root is the largest value.
    Max,
    /// Root is the smallest value.
    Min,
}

impl Orientation {
    /// `true` when `a` belongs strictly closer to the root than `b`.
    #[inline]
    fn precedes(self, a: f64, b: f64) -> bool {
        match self {
            Orientation::Max => a > b,
            Orientation::Min => a < b,
        }
    }
}

/// Tiny fixed-capacity priority queue over `f64`.
///
/// Values are kept sorted with the root at index 0, so `peek` is free and
/// `truncate` drops the values farthest from the root.
#[derive(Clone, Copy)]
pub struct BoundedHeap {
    orientation: Orientation,
    len: usize,
    items: [f64; SLOTS],
}

impl BoundedHeap {
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            len: 0,
            items: [0.0; SLOTS],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn peek(&self) -> Option<f64> {
        self.as_slice().first().copied()
    }

    /// Values ordered from the root outwards.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.items[..self.len]
    }

    /// Inserts `value`. When every slot is taken the value farthest from the
    /// root is discarded to make room.
    pub fn push(&mut self, value: f64) {
        let orientation = self.orientation;
        let pos = self
            .as_slice()
            .partition_point(|&held| !orientation.precedes(value, held));
        if pos >= SLOTS {
            return;
        }
        let last = self.len.min(SLOTS - 1);
        self.items.copy_within(pos..last, pos + 1);
        self.items[pos] = value;
        self.len = (self.len + 1).min(SLOTS);
    }

    /// Pushes `value` and then pops the root, without ever growing.
    pub fn push_pop(&mut self, value: f64) -> f64 {
        match self.peek() {
            Some(root) if self.orientation.precedes(root, value) => {
                self.items[0] = value;
                let orientation = self.orientation;
                let pos = self.items[1..self.len]
                    .partition_point(|&held| !orientation.precedes(value, held));
                self.items.copy_within(1..pos + 1, 0);
                self.items[pos] = value;
                root
            }
            _ => value,
        }
    }

    /// Keeps only the `n` values nearest the root.
    #[inline]
    pub fn truncate(&mut self, n: usize) {
        self.len = self.len.min(n);
    }
}

impl fmt::Debug for BoundedHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedHeap")
            .field("orientation", &self.orientation)
            .field("items", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_heap_keeps_largest_at_root() {
        let mut heap = BoundedHeap::new(Orientation::Max);
        for v in [3.0, 9.0, 1.0, 5.0] {
            heap.push(v);
        }
        assert_eq!(heap.as_slice(), &[9.0, 5.0, 3.0, 1.0]);
        assert_eq!(heap.peek(), Some(9.0));
        assert_eq!(heap.len(), 4);
        heap.truncate(RETAIN);
        assert_eq!(heap.as_slice(), &[9.0, 5.0, 3.0]);
    }

    #[test]
    fn min_heap_keeps_smallest_at_root() {
        let mut heap = BoundedHeap::new(Orientation::Min);
        for v in [3.0, 9.0, 1.0, 5.0] {
            heap.push(v);
        }
        assert_eq!(heap.as_slice(), &[1.0, 3.0, 5.0, 9.0]);
        heap.truncate(RETAIN);
        assert_eq!(heap.as_slice(), &[1.0, 3.0, 5.0]);
    }

    #[test]
    fn full_heap_drops_farthest_value() {
        let mut heap = BoundedHeap::new(Orientation::Min);
        for v in [4.0, 3.0, 2.0, 1.0, 0.5] {
            heap.push(v);
        }
        assert_eq!(heap.as_slice(), &[0.5, 1.0, 2.0, 3.0]);
        heap.push(10.0);
        assert_eq!(heap.as_slice(), &[0.5, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn push_pop_returns_value_when_it_would_be_root() {
        let mut heap = BoundedHeap::new(Orientation::Min);
        assert_eq!(heap.push_pop(7.0), 7.0);
        assert!(heap.is_empty());

        heap.push(5.0);
        heap.push(8.0);
        assert_eq!(heap.push_pop(2.0), 2.0);
        assert_eq!(heap.as_slice(), &[5.0, 8.0]);
    }

    #[test]
    fn push_pop_replaces_root() {
        let mut heap = BoundedHeap::new(Orientation::Max);
        for v in [5.0, 8.0, 1.0] {
            heap.push(v);
        }
        assert_eq!(heap.push_pop(6.0), 8.0);
        assert_eq!(heap.as_slice(), &[6.0, 5.0, 1.0]);
        assert_eq!(heap.push_pop(0.0), 6.0);
        assert_eq!(heap.as_slice(), &[5.0, 1.0, 0.0]);
    }

    #[test]
    fn ties_keep_both_copies() {
        let mut heap = BoundedHeap::new(Orientation::Max);
        heap.push(2.0);
        heap.push(2.0);
        assert_eq!(heap.push_pop(2.0), 2.0);
        assert_eq!(heap.as_slice(), &[2.0, 2.0]);
    }
}
