//! Cluster-level checks: version rollout state and operator health.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

use super::{condition_is_true, list_items, object_name};

const CLUSTER_VERSION_PATH: &str = "/apis/config.openshift.io/v1/clusterversions/version";
const CLUSTER_OPERATORS_PATH: &str = "/apis/config.openshift.io/v1/clusteroperators";

pub fn cluster_version() -> Arc<dyn Check> {
    Arc::new(ClusterVersionCheck)
}

pub fn cluster_operators() -> Arc<dyn Check> {
    Arc::new(ClusterOperatorsCheck)
}

/// Verifies the cluster version object is Available and not stuck
/// progressing or failing.
struct ClusterVersionCheck;

impl Check for ClusterVersionCheck {
    fn id(&self) -> &str {
        "cluster-version"
    }

    fn name(&self) -> &str {
        "Cluster version"
    }

    fn category(&self) -> Category {
        Category::from("Cluster")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let version = cluster.get_raw(CLUSTER_VERSION_PATH)?;

        let desired = version
            .pointer("/status/desired/version")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        let available = condition_is_true(&version, "Available").unwrap_or(false);
        let progressing = condition_is_true(&version, "Progressing").unwrap_or(false);
        let failing = condition_is_true(&version, "Failing").unwrap_or(false);

        let result = if failing {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                format!("cluster version {desired} is failing to reconcile"),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("inspect the cluster-version operator logs")
        } else if progressing {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("cluster is progressing towards {desired}"),
            )
            .with_key(ResultKey::Advisory)
            .with_recommendation("wait for the rollout to settle before auditing")
        } else if available {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("cluster version {desired} is available"),
            )
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Unknown,
                "cluster version reports no Available condition",
            )
            .with_key(ResultKey::Advisory)
        };

        Ok(result.with_metadata("version", desired))
    }
}

/// Flags degraded or unavailable cluster operators.
struct ClusterOperatorsCheck;

impl Check for ClusterOperatorsCheck {
    fn id(&self) -> &str {
        "cluster-operators"
    }

    fn name(&self) -> &str {
        "Cluster operators"
    }

    fn category(&self) -> Category {
        Category::from("Cluster")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let operators = cluster.get_raw(CLUSTER_OPERATORS_PATH)?;
        let items = list_items(&operators);

        let mut degraded = Vec::new();
        let mut unavailable = Vec::new();
        for operator in items {
            if condition_is_true(operator, "Degraded") == Some(true) {
                degraded.push(object_name(operator).to_string());
            }
            if condition_is_true(operator, "Available") == Some(false) {
                unavailable.push(object_name(operator).to_string());
            }
        }

        let result = if !degraded.is_empty() || !unavailable.is_empty() {
            let mut broken: Vec<String> = degraded.clone();
            broken.extend(unavailable.iter().cloned());
            broken.sort();
            broken.dedup();
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                format!("{} operator(s) degraded or unavailable", broken.len()),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("check `oc get clusteroperators` for the listed operators")
            .with_detail(broken.join("\n"))
        } else if items.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Unknown,
                "no cluster operators reported",
            )
            .with_key(ResultKey::Advisory)
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("all {} cluster operators healthy", items.len()),
            )
        };

        Ok(result.with_metadata("operators", items.len().to_string()))
    }
}
