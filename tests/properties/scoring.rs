//! Property tests for executive-summary scoring.

use proptest::prelude::*;

use clusteraudit::models::Status;
use clusteraudit::scorer::{score, ParsedCategory, ParsedEntry, ParsedReport};

fn any_status() -> impl Strategy<Value = Status> {
    proptest::sample::select(Status::ALL.to_vec())
}

fn any_report() -> impl Strategy<Value = ParsedReport> {
    proptest::collection::vec(
        proptest::collection::vec(any_status(), 1..=8),
        1..=5,
    )
    .prop_map(|categories| {
        let mut order = 0usize;
        let categories = categories
            .into_iter()
            .enumerate()
            .map(|(category_index, statuses)| ParsedCategory {
                name: format!("Category {category_index}"),
                entries: statuses
                    .into_iter()
                    .enumerate()
                    .map(|(entry_index, status)| {
                        let entry = ParsedEntry {
                            name: format!("Check {category_index}-{entry_index}"),
                            status,
                            message: "generated".to_string(),
                            recommendations: Vec::new(),
                            order,
                        };
                        order += 1;
                        entry
                    })
                    .collect(),
            })
            .collect();
        ParsedReport {
            title: "Generated Report".to_string(),
            categories,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every score, including the overall, stays inside [0, 100].
    #[test]
    fn property_scores_are_clamped(report in any_report()) {
        let card = score(&report, "cluster", "customer");
        for category in &card.categories {
            prop_assert!((0.0..=100.0).contains(&category.score));
        }
        prop_assert!((0.0..=100.0).contains(&card.overall));
    }

    /// PROPERTY: The attention list holds exactly the non-OK entries,
    /// ordered by non-increasing severity.
    #[test]
    fn property_attention_list_is_severity_sorted(report in any_report()) {
        let card = score(&report, "cluster", "customer");

        let expected: usize = report
            .categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .filter(|e| e.status != Status::Ok)
            .count();
        prop_assert_eq!(card.attention.len(), expected);

        for pair in card.attention.windows(2) {
            prop_assert!(pair[0].status >= pair[1].status);
        }
    }

    /// PROPERTY: An all-OK report scores 100 with an empty attention list.
    #[test]
    fn property_all_ok_scores_perfect(sizes in proptest::collection::vec(1usize..=6, 1..=4)) {
        let categories = sizes
            .iter()
            .enumerate()
            .map(|(category_index, count)| ParsedCategory {
                name: format!("Category {category_index}"),
                entries: (0..*count)
                    .map(|entry_index| ParsedEntry {
                        name: format!("Check {entry_index}"),
                        status: Status::Ok,
                        message: "fine".to_string(),
                        recommendations: Vec::new(),
                        order: entry_index,
                    })
                    .collect(),
            })
            .collect();
        let report = ParsedReport {
            title: "All Clear".to_string(),
            categories,
        };

        let card = score(&report, "cluster", "customer");
        prop_assert_eq!(card.overall, 100.0);
        prop_assert!(card.attention.is_empty());
    }
}
