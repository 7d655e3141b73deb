//! Storage checks: default storage class hygiene and stuck claims.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

use super::{list_items, object_name};

const STORAGE_CLASSES_PATH: &str = "/apis/storage.k8s.io/v1/storageclasses";
const CLAIMS_PATH: &str = "/api/v1/persistentvolumeclaims";
const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

pub fn default_storage_class() -> Arc<dyn Check> {
    Arc::new(DefaultStorageClassCheck)
}

pub fn pending_claims() -> Arc<dyn Check> {
    Arc::new(PendingClaimsCheck)
}

/// Exactly one storage class should carry the default annotation.
struct DefaultStorageClassCheck;

impl Check for DefaultStorageClassCheck {
    fn id(&self) -> &str {
        "default-storage-class"
    }

    fn name(&self) -> &str {
        "Default storage class"
    }

    fn category(&self) -> Category {
        Category::from("Storage")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let classes = cluster.get_raw(STORAGE_CLASSES_PATH)?;
        let defaults: Vec<String> = list_items(&classes)
            .iter()
            .filter(|class| {
                class
                    .pointer(&format!("/metadata/annotations/{}", DEFAULT_CLASS_ANNOTATION.replace('/', "~1")))
                    .and_then(|a| a.as_str())
                    == Some("true")
            })
            .map(|class| object_name(class).to_string())
            .collect();

        let result = match defaults.len() {
            0 => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                "no default storage class - unannotated claims will hang",
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("annotate one storage class as the default"),
            1 => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("default storage class is {}", defaults[0]),
            )
            .with_metadata("class", defaults[0].clone()),
            _ => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("{} storage classes claim to be the default", defaults.len()),
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("keep exactly one default storage class")
            .with_detail(defaults.join("\n")),
        };

        Ok(result)
    }
}

/// Claims stuck in Pending usually mean a provisioner problem.
struct PendingClaimsCheck;

impl Check for PendingClaimsCheck {
    fn id(&self) -> &str {
        "pending-claims"
    }

    fn name(&self) -> &str {
        "Pending volume claims"
    }

    fn category(&self) -> Category {
        Category::from("Storage")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let claims = cluster.get_raw(CLAIMS_PATH)?;
        let items = list_items(&claims);

        if items.is_empty() {
            return Ok(CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::NotApplicable,
                "cluster has no persistent volume claims",
            )
            .with_key(ResultKey::NotApplicable));
        }

        let pending: Vec<String> = items
            .iter()
            .filter(|claim| {
                claim.pointer("/status/phase").and_then(|p| p.as_str()) == Some("Pending")
            })
            .map(|claim| object_name(claim).to_string())
            .collect();

        let result = if pending.is_empty() {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("all {} claims bound", items.len()),
            )
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("{} claim(s) stuck in Pending", pending.len()),
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("check the provisioner for the listed claims")
            .with_detail(pending.join("\n"))
        };

        Ok(result.with_metadata("claims", items.len().to_string()))
    }
}
