//! Property tests for clusteraudit.
//!
//! Properties use randomized input generation to protect the aggregation
//! and scoring invariants the reports depend on.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/aggregation.rs"]
mod aggregation;

#[path = "properties/scoring.rs"]
mod scoring;
