//! Check capability and registry
//!
//! A check is an independent diagnostic probe with a stable identity and a
//! single `run` operation. The engine depends only on this trait; concrete
//! checks live in [`crate::checks`] and are assembled explicitly, never via
//! global registration.

use std::collections::HashSet;
use std::sync::Arc;

use crate::cluster::ClusterAccessor;
use crate::error::{AuditError, AuditResult};
use crate::models::{Category, CheckResult};

/// An independent diagnostic probe.
///
/// Checks are stateless between runs and are never mutated by the engine.
/// `run` returns the check's verdict; an `Err` means the check could not
/// complete at all, and the runner synthesizes a Critical result for it so
/// counts always reconcile.
pub trait Check: Send + Sync {
    /// Stable identity, unique within a registry, primary key for lookups.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Grouping label.
    fn category(&self) -> Category;

    /// Execute the probe against the cluster.
    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult>;
}

/// Ordered, deduplicated collection of checks.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Arc<dyn Check>>,
    ids: HashSet<String>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one check. A duplicate ID is a construction-time error;
    /// it must surface before anything executes.
    pub fn add(&mut self, check: Arc<dyn Check>) -> AuditResult<()> {
        if !self.ids.insert(check.id().to_string()) {
            return Err(AuditError::DuplicateCheck {
                id: check.id().to_string(),
            });
        }
        self.checks.push(check);
        Ok(())
    }

    pub fn add_all(&mut self, checks: Vec<Arc<dyn Check>>) -> AuditResult<()> {
        for check in checks {
            self.add(check)?;
        }
        Ok(())
    }

    /// Non-destructive category filter preserving insertion order.
    /// An empty filter selects every check.
    pub fn filter(&self, categories: &[Category]) -> Vec<Arc<dyn Check>> {
        if categories.is_empty() {
            return self.checks.clone();
        }
        self.checks
            .iter()
            .filter(|c| categories.contains(&c.category()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Categories present in the registry, in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for check in &self.checks {
            let category = check.category();
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    struct FakeCheck {
        id: &'static str,
        category: &'static str,
    }

    impl Check for FakeCheck {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.id
        }

        fn category(&self) -> Category {
            Category::from(self.category)
        }

        fn run(&self, _cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
            Ok(CheckResult::new(
                self.id,
                self.id,
                self.category(),
                Status::Ok,
                "fine",
            ))
        }
    }

    fn fake(id: &'static str, category: &'static str) -> Arc<dyn Check> {
        Arc::new(FakeCheck { id, category })
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut registry = CheckRegistry::new();
        registry.add(fake("a", "Cluster")).unwrap();
        let err = registry.add(fake("a", "Security")).unwrap_err();
        assert!(matches!(err, AuditError::DuplicateCheck { id } if id == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn filter_empty_selects_all_in_order() {
        let mut registry = CheckRegistry::new();
        registry
            .add_all(vec![fake("a", "Cluster"), fake("b", "Security"), fake("c", "Cluster")])
            .unwrap();

        let selected = registry.filter(&[]);
        let ids: Vec<&str> = selected.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn filter_by_category_preserves_insertion_order() {
        let mut registry = CheckRegistry::new();
        registry
            .add_all(vec![
                fake("a", "Cluster"),
                fake("b", "Security"),
                fake("c", "Cluster"),
                fake("d", "Storage"),
            ])
            .unwrap();

        let selected = registry.filter(&[Category::from("Cluster")]);
        let ids: Vec<&str> = selected.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        // non-destructive
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn categories_are_first_seen_order() {
        let mut registry = CheckRegistry::new();
        registry
            .add_all(vec![fake("a", "Security"), fake("b", "Cluster"), fake("c", "Security")])
            .unwrap();
        let categories = registry.categories();
        assert_eq!(
            categories,
            vec![Category::from("Security"), Category::from("Cluster")]
        );
    }
}
