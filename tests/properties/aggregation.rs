//! Property tests for result aggregation.

use proptest::prelude::*;

use clusteraudit::models::{Category, CheckResult, Status};
use clusteraudit::Aggregator;

fn any_status() -> impl Strategy<Value = Status> {
    proptest::sample::select(Status::ALL.to_vec())
}

fn results_from(statuses: &[Status]) -> Vec<CheckResult> {
    statuses
        .iter()
        .enumerate()
        .map(|(index, status)| {
            CheckResult::new(
                format!("check-{index}"),
                format!("Check {index}"),
                Category::from(if index % 2 == 0 { "Cluster" } else { "Security" }),
                *status,
                "generated",
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Status counts always reconcile with the number of results.
    #[test]
    fn property_counts_sum_to_total(
        statuses in proptest::collection::vec(any_status(), 0..=32),
    ) {
        let results = results_from(&statuses);
        let aggregator = Aggregator::new(&results);
        let sum: usize = aggregator.count_by_status().values().sum();
        prop_assert_eq!(sum, results.len());
        prop_assert_eq!(aggregator.total(), results.len());
    }

    /// PROPERTY: The worst status is the severity maximum of the inputs.
    #[test]
    fn property_worst_status_is_the_maximum(
        statuses in proptest::collection::vec(any_status(), 1..=32),
    ) {
        let results = results_from(&statuses);
        let aggregator = Aggregator::new(&results);
        let expected = statuses.iter().copied().max();
        prop_assert_eq!(aggregator.worst_status(), expected);
    }

    /// PROPERTY: Grouping by category never drops or duplicates a result.
    #[test]
    fn property_category_grouping_is_a_partition(
        statuses in proptest::collection::vec(any_status(), 0..=32),
    ) {
        let results = results_from(&statuses);
        let aggregator = Aggregator::new(&results);
        let grouped: usize = aggregator
            .results_by_category()
            .iter()
            .map(|(_, entries)| entries.len())
            .sum();
        prop_assert_eq!(grouped, results.len());
    }
}
