//! Read-only views over a run's results
//!
//! Every view is recomputed on call; the aggregator never caches across a
//! run and never mutates the results it borrows.

use std::collections::BTreeMap;

use crate::models::{Category, CheckResult, Status};

/// Pure read-side views over a result collection.
pub struct Aggregator<'a> {
    results: &'a [CheckResult],
}

impl<'a> Aggregator<'a> {
    pub fn new(results: &'a [CheckResult]) -> Self {
        Aggregator { results }
    }

    /// Count per status. The values always sum to the number of checks
    /// actually executed.
    pub fn count_by_status(&self) -> BTreeMap<Status, usize> {
        let mut counts = BTreeMap::new();
        for result in self.results {
            *counts.entry(result.status).or_insert(0) += 1;
        }
        counts
    }

    pub fn results_by_status(&self) -> BTreeMap<Status, Vec<&'a CheckResult>> {
        let mut grouped: BTreeMap<Status, Vec<&CheckResult>> = BTreeMap::new();
        for result in self.results {
            grouped.entry(result.status).or_default().push(result);
        }
        grouped
    }

    /// Results grouped by category, categories in first-seen order and
    /// results in execution order within each.
    pub fn results_by_category(&self) -> Vec<(Category, Vec<&'a CheckResult>)> {
        let mut grouped: Vec<(Category, Vec<&CheckResult>)> = Vec::new();
        for result in self.results {
            match grouped.iter_mut().find(|(c, _)| *c == result.category) {
                Some((_, bucket)) => bucket.push(result),
                None => grouped.push((result.category.clone(), vec![result])),
            }
        }
        grouped
    }

    /// Highest severity present, or `None` for an empty run.
    pub fn worst_status(&self) -> Option<Status> {
        self.results.iter().map(|r| r.status).max()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}
