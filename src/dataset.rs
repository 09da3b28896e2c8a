//! Date-ordered dataset wrapper and the date filter.
//!
//! Every trailing-window metric reads "the last N rows as ordered", so the
//! date-ordering precondition is enforced by construction: a `DateOrdered`
//! can only be built through a sort, never from a raw vector.

use crate::records::{DateRange, Dated};

/// A dataset whose rows are guaranteed to be in ascending date order.
///
/// The sort is stable, so rows sharing a date keep their original relative
/// order (feature-adoption data has several rows per date).
#[derive(Debug, Clone, PartialEq)]
pub struct DateOrdered<R: Dated> {
    records: Vec<R>,
}

impl<R: Dated> DateOrdered<R> {
    /// Sorts the given rows by date and wraps them.
    pub fn from_unsorted(mut records: Vec<R>) -> Self {
        records.sort_by_key(|r| r.date());
        DateOrdered { records }
    }

    /// All rows in ascending date order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The trailing window: the last `n` rows, or all rows when fewer exist.
    pub fn last_n(&self, n: usize) -> &[R] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// The most recent row, if any.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the wrapper and returns the sorted rows.
    pub fn into_inner(self) -> Vec<R> {
        self.records
    }
}

/// Restricts rows to an inclusive `[start, end]` interval.
///
/// Preserves the original order and never mutates the caller's data. An
/// interval with `start > end` yields an empty result rather than an error.
pub fn filter_by_date_range<R: Dated + Clone>(records: &[R], range: &DateRange) -> Vec<R> {
    records
        .iter()
        .filter(|r| range.contains(r.date()))
        .cloned()
        .collect()
}
