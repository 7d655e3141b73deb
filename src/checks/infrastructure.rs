//! Infrastructure checks: node readiness and machine config pool state.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

use super::{condition_is_true, list_items, object_name};

const NODES_PATH: &str = "/api/v1/nodes";
const MCP_PATH: &str = "/apis/machineconfiguration.openshift.io/v1/machineconfigpools";

pub fn node_readiness() -> Arc<dyn Check> {
    Arc::new(NodeReadinessCheck)
}

pub fn machine_config_pools() -> Arc<dyn Check> {
    Arc::new(MachineConfigPoolsCheck)
}

struct NodeReadinessCheck;

impl Check for NodeReadinessCheck {
    fn id(&self) -> &str {
        "node-readiness"
    }

    fn name(&self) -> &str {
        "Node readiness"
    }

    fn category(&self) -> Category {
        Category::from("Infrastructure")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let nodes = cluster.get_raw(NODES_PATH)?;
        let items = list_items(&nodes);

        let not_ready: Vec<String> = items
            .iter()
            .filter(|node| condition_is_true(node, "Ready") != Some(true))
            .map(|node| object_name(node).to_string())
            .collect();

        let result = if items.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Unknown,
                "node list came back empty",
            )
            .with_key(ResultKey::Advisory)
        } else if not_ready.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("all {} nodes ready", items.len()),
            )
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                format!("{} of {} nodes not ready", not_ready.len(), items.len()),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("describe the listed nodes and check kubelet health")
            .with_detail(not_ready.join("\n"))
        };

        Ok(result.with_metadata("nodes", items.len().to_string()))
    }
}

/// Degraded pools block config rollout; updating pools are transient.
struct MachineConfigPoolsCheck;

impl Check for MachineConfigPoolsCheck {
    fn id(&self) -> &str {
        "machine-config-pools"
    }

    fn name(&self) -> &str {
        "Machine config pools"
    }

    fn category(&self) -> Category {
        Category::from("Infrastructure")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let pools = cluster.get_raw(MCP_PATH)?;
        let items = list_items(&pools);

        let mut degraded = Vec::new();
        let mut updating = Vec::new();
        for pool in items {
            if condition_is_true(pool, "Degraded") == Some(true) {
                degraded.push(object_name(pool).to_string());
            } else if condition_is_true(pool, "Updating") == Some(true) {
                updating.push(object_name(pool).to_string());
            }
        }

        let result = if !degraded.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                format!("{} machine config pool(s) degraded", degraded.len()),
            )
            .with_key(ResultKey::Required)
            .with_recommendation("check machine-config-daemon logs on affected nodes")
            .with_detail(degraded.join("\n"))
        } else if !updating.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("{} pool(s) still rolling out config", updating.len()),
            )
            .with_key(ResultKey::Advisory)
            .with_detail(updating.join("\n"))
        } else if items.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::NotApplicable,
                "cluster has no machine config pools",
            )
            .with_key(ResultKey::NotApplicable)
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("all {} machine config pools settled", items.len()),
            )
        };

        Ok(result)
    }
}
