//! Application workload checks: crash-looping pods, under-replicated
//! deployments.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

use super::{list_items, object_name};

const PODS_PATH: &str = "/api/v1/pods";
const DEPLOYMENTS_PATH: &str = "/apis/apps/v1/deployments";

pub fn crashloop_pods() -> Arc<dyn Check> {
    Arc::new(CrashloopPodsCheck)
}

pub fn replica_mismatch() -> Arc<dyn Check> {
    Arc::new(ReplicaMismatchCheck)
}

/// Flags pods with containers in CrashLoopBackOff.
struct CrashloopPodsCheck;

impl Check for CrashloopPodsCheck {
    fn id(&self) -> &str {
        "crashloop-pods"
    }

    fn name(&self) -> &str {
        "Crash-looping pods"
    }

    fn category(&self) -> Category {
        Category::from("Applications")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let pods = cluster.get_raw(PODS_PATH)?;
        let items = list_items(&pods);

        let crashing: Vec<String> = items
            .iter()
            .filter(|pod| {
                pod.pointer("/status/containerStatuses")
                    .and_then(|statuses| statuses.as_array())
                    .map(|statuses| {
                        statuses.iter().any(|status| {
                            status.pointer("/state/waiting/reason").and_then(|r| r.as_str())
                                == Some("CrashLoopBackOff")
                        })
                    })
                    .unwrap_or(false)
            })
            .map(|pod| object_name(pod).to_string())
            .collect();

        let result = if crashing.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("no crash-looping pods among {}", items.len()),
            )
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                format!("{} pod(s) in CrashLoopBackOff", crashing.len()),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("inspect logs of the listed pods")
            .with_detail(crashing.join("\n"))
        };

        Ok(result.with_metadata("pods", items.len().to_string()))
    }
}

/// Flags deployments running fewer ready replicas than desired.
struct ReplicaMismatchCheck;

impl Check for ReplicaMismatchCheck {
    fn id(&self) -> &str {
        "replica-mismatch"
    }

    fn name(&self) -> &str {
        "Deployment replica mismatch"
    }

    fn category(&self) -> Category {
        Category::from("Applications")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let deployments = cluster.get_raw(DEPLOYMENTS_PATH)?;
        let items = list_items(&deployments);

        if items.is_empty() {
            return Ok(CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::NotApplicable,
                "no deployments in the cluster",
            )
            .with_key(ResultKey::NotApplicable));
        }

        let starved: Vec<String> = items
            .iter()
            .filter(|deployment| {
                let desired = deployment
                    .pointer("/spec/replicas")
                    .and_then(|r| r.as_u64())
                    .unwrap_or(1);
                let ready = deployment
                    .pointer("/status/readyReplicas")
                    .and_then(|r| r.as_u64())
                    .unwrap_or(0);
                ready < desired
            })
            .map(|deployment| object_name(deployment).to_string())
            .collect();

        let result = if starved.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("all {} deployments fully ready", items.len()),
            )
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("{} deployment(s) below desired replicas", starved.len()),
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("describe the listed deployments for unschedulable pods")
            .with_detail(starved.join("\n"))
        };

        Ok(result.with_metadata("deployments", items.len().to_string()))
    }
}
