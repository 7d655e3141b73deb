//! Shipped diagnostic checks
//!
//! Concrete probes, grouped by category. Each is an independent
//! implementation of the [`Check`] capability built by its own factory
//! function; registry assembly is explicit and happens exactly once at
//! process start via [`build_registry`] - there is no ambient global
//! state.

pub mod applications;
pub mod cluster;
pub mod infrastructure;
pub mod monitoring;
pub mod networking;
pub mod security;
pub mod storage;

use std::sync::Arc;

use crate::check::{Check, CheckRegistry};
use crate::error::{AuditError, AuditResult};
use crate::models::{Category, CheckSet};

/// Category labels carried by the shipped check set. Used only for CLI
/// validation; the engine itself treats categories as opaque.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "Cluster",
    "Security",
    "Networking",
    "Storage",
    "Applications",
    "Monitoring",
    "Infrastructure",
];

/// Reject category filters that no shipped check could ever match.
pub fn validate_categories(categories: &[Category]) -> AuditResult<()> {
    for category in categories {
        if !KNOWN_CATEGORIES.contains(&category.as_str()) {
            return Err(AuditError::UnknownCategory {
                category: category.to_string(),
                known: KNOWN_CATEGORIES.join(", "),
            });
        }
    }
    Ok(())
}

/// Build the full check set for one invocation.
pub fn build_registry(set: CheckSet) -> AuditResult<CheckRegistry> {
    let mut registry = CheckRegistry::new();

    if matches!(set, CheckSet::Openshift | CheckSet::All) {
        registry.add_all(openshift_checks())?;
    }
    if matches!(set, CheckSet::Application | CheckSet::All) {
        registry.add_all(application_checks())?;
    }

    Ok(registry)
}

fn openshift_checks() -> Vec<Arc<dyn Check>> {
    vec![
        cluster::cluster_version(),
        cluster::cluster_operators(),
        security::kubeadmin_secret(),
        security::audit_profile(),
        networking::ingress_controller(),
        networking::cluster_network_mtu(),
        storage::default_storage_class(),
        storage::pending_claims(),
        monitoring::prometheus_health(),
        monitoring::alertmanager_replicas(),
        infrastructure::node_readiness(),
        infrastructure::machine_config_pools(),
    ]
}

fn application_checks() -> Vec<Arc<dyn Check>> {
    vec![
        applications::crashloop_pods(),
        applications::replica_mismatch(),
    ]
}

/// Items array of a Kubernetes list object, empty when absent.
pub(crate) fn list_items(value: &serde_json::Value) -> &[serde_json::Value] {
    value
        .get("items")
        .and_then(|items| items.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Look up `status.conditions[type == condition]` and report whether its
/// status is `"True"`. `None` when the condition is absent.
pub(crate) fn condition_is_true(object: &serde_json::Value, condition: &str) -> Option<bool> {
    let conditions = object
        .get("status")?
        .get("conditions")?
        .as_array()?;
    conditions
        .iter()
        .find(|c| c.get("type").and_then(|t| t.as_str()) == Some(condition))
        .map(|c| c.get("status").and_then(|s| s.as_str()) == Some("True"))
}

/// Object name from metadata, "<unnamed>" when missing.
pub(crate) fn object_name(object: &serde_json::Value) -> &str {
    object
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("<unnamed>")
}
