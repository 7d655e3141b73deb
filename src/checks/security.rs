//! Security checks: leftover bootstrap credentials and API audit policy.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

const KUBEADMIN_SECRET_PATH: &str = "/api/v1/namespaces/kube-system/secrets/kubeadmin";
const APISERVER_PATH: &str = "/apis/config.openshift.io/v1/apiservers/cluster";

pub fn kubeadmin_secret() -> Arc<dyn Check> {
    Arc::new(KubeadminSecretCheck)
}

pub fn audit_profile() -> Arc<dyn Check> {
    Arc::new(AuditProfileCheck)
}

/// The temporary kubeadmin user should be removed once real identity
/// providers are configured; its continued presence is a standing
/// credential risk.
struct KubeadminSecretCheck;

impl Check for KubeadminSecretCheck {
    fn id(&self) -> &str {
        "kubeadmin-secret"
    }

    fn name(&self) -> &str {
        "Kubeadmin secret"
    }

    fn category(&self) -> Category {
        Category::from("Security")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        match cluster.get_raw(KUBEADMIN_SECRET_PATH) {
            Ok(_) => Ok(CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                "bootstrap kubeadmin secret still present",
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("delete the kubeadmin secret once an identity provider is in place")),
            // NotFound is the desired state, not a failure
            Err(error) if error.to_string().contains("NotFound") => Ok(CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                "kubeadmin secret has been removed",
            )),
            Err(error) => Err(error),
        }
    }
}

/// The API server audit profile should not be disabled.
struct AuditProfileCheck;

impl Check for AuditProfileCheck {
    fn id(&self) -> &str {
        "audit-profile"
    }

    fn name(&self) -> &str {
        "API server audit profile"
    }

    fn category(&self) -> Category {
        Category::from("Security")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let apiserver = cluster.get_raw(APISERVER_PATH)?;
        let profile = apiserver
            .pointer("/spec/audit/profile")
            .and_then(|p| p.as_str());

        let result = match profile {
            Some("None") => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                "API server auditing is disabled",
            )
            .with_key(ResultKey::Required)
            .with_recommendation("set spec.audit.profile to Default or stricter"),
            Some(profile) => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("audit profile is {profile}"),
            )
            .with_metadata("profile", profile),
            None => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Unknown,
                "API server object carries no audit profile",
            )
            .with_key(ResultKey::Advisory),
        };

        Ok(result)
    }
}
