//! Monitoring checks: Prometheus and Alertmanager availability.
//!
//! The Prometheus probe is the one place the audit uses an ordered
//! acquisition-strategy chain: the typed monitoring API first, the
//! statefulset status as the alternate, and the CLI as the last resort.
//! Each strategy returns a typed outcome; the chain stops at the first
//! success and records which strategy answered.

use std::sync::Arc;

use anyhow::anyhow;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

const PROMETHEUS_API_PATH: &str =
    "/apis/monitoring.coreos.com/v1/namespaces/openshift-monitoring/prometheuses/k8s";
const PROMETHEUS_STS_PATH: &str =
    "/apis/apps/v1/namespaces/openshift-monitoring/statefulsets/prometheus-k8s";
const ALERTMANAGER_STS_PATH: &str =
    "/apis/apps/v1/namespaces/openshift-monitoring/statefulsets/alertmanager-main";

pub fn prometheus_health() -> Arc<dyn Check> {
    Arc::new(PrometheusHealthCheck)
}

pub fn alertmanager_replicas() -> Arc<dyn Check> {
    Arc::new(AlertmanagerReplicasCheck)
}

/// Replica picture recovered by one acquisition strategy.
struct ReplicaReading {
    strategy: &'static str,
    available: u64,
    desired: u64,
}

struct PrometheusHealthCheck;

impl PrometheusHealthCheck {
    fn from_monitoring_api(cluster: &dyn ClusterAccessor) -> anyhow::Result<ReplicaReading> {
        let prometheus = cluster.get_raw(PROMETHEUS_API_PATH)?;
        let available = prometheus
            .pointer("/status/availableReplicas")
            .and_then(|r| r.as_u64())
            .ok_or_else(|| anyhow!("monitoring API reports no availableReplicas"))?;
        let desired = prometheus
            .pointer("/spec/replicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(2);
        Ok(ReplicaReading {
            strategy: "monitoring-api",
            available,
            desired,
        })
    }

    fn from_statefulset(cluster: &dyn ClusterAccessor) -> anyhow::Result<ReplicaReading> {
        let statefulset = cluster.get_raw(PROMETHEUS_STS_PATH)?;
        let available = statefulset
            .pointer("/status/readyReplicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(0);
        let desired = statefulset
            .pointer("/spec/replicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(2);
        Ok(ReplicaReading {
            strategy: "statefulset",
            available,
            desired,
        })
    }

    fn from_cli(cluster: &dyn ClusterAccessor) -> anyhow::Result<ReplicaReading> {
        let output = cluster.exec(&[
            "get",
            "pods",
            "-n",
            "openshift-monitoring",
            "-l",
            "app.kubernetes.io/name=prometheus",
            "-o",
            "json",
        ])?;
        let pods: serde_json::Value = serde_json::from_str(&output)?;
        let items = super::list_items(&pods);
        let running = items
            .iter()
            .filter(|pod| pod.pointer("/status/phase").and_then(|p| p.as_str()) == Some("Running"))
            .count() as u64;
        Ok(ReplicaReading {
            strategy: "cli",
            available: running,
            desired: items.len().max(1) as u64,
        })
    }
}

impl Check for PrometheusHealthCheck {
    fn id(&self) -> &str {
        "prometheus-health"
    }

    fn name(&self) -> &str {
        "Prometheus availability"
    }

    fn category(&self) -> Category {
        Category::from("Monitoring")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        // Ordered strategy chain; first success wins.
        let strategies: [fn(&dyn ClusterAccessor) -> anyhow::Result<ReplicaReading>; 3] = [
            Self::from_monitoring_api,
            Self::from_statefulset,
            Self::from_cli,
        ];

        let mut attempts = Vec::new();
        let mut reading = None;
        for strategy in strategies {
            match strategy(cluster) {
                Ok(found) => {
                    reading = Some(found);
                    break;
                }
                Err(error) => attempts.push(error.to_string()),
            }
        }

        let Some(reading) = reading else {
            return Err(anyhow!(
                "all acquisition strategies failed: {}",
                attempts.join("; ")
            ));
        };

        let result = if reading.available == 0 {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                "no Prometheus replicas available - metrics are blind",
            )
            .with_key(ResultKey::Required)
            .with_recommendation("inspect the openshift-monitoring namespace")
        } else if reading.available < reading.desired {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!(
                    "Prometheus running {}/{} replicas",
                    reading.available, reading.desired
                ),
            )
            .with_key(ResultKey::Recommended)
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!(
                    "Prometheus running {}/{} replicas",
                    reading.available, reading.desired
                ),
            )
        };

        Ok(result.with_metadata("strategy", reading.strategy))
    }
}

/// Alertmanager below two replicas loses quorum on restart.
struct AlertmanagerReplicasCheck;

impl Check for AlertmanagerReplicasCheck {
    fn id(&self) -> &str {
        "alertmanager-replicas"
    }

    fn name(&self) -> &str {
        "Alertmanager replicas"
    }

    fn category(&self) -> Category {
        Category::from("Monitoring")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let statefulset = cluster.get_raw(ALERTMANAGER_STS_PATH)?;
        let ready = statefulset
            .pointer("/status/readyReplicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(0);

        let result = match ready {
            0 => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                "no Alertmanager replicas ready - alerts will not fire",
            )
            .with_key(ResultKey::Required)
            .with_recommendation("inspect the alertmanager-main statefulset"),
            1 => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                "single Alertmanager replica, no redundancy",
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("scale alertmanager-main to at least 2 replicas"),
            ready => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("{ready} Alertmanager replicas ready"),
            ),
        };

        Ok(result.with_metadata("ready", ready.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::FakeAccessor;
    use serde_json::json;

    #[test]
    fn primary_strategy_wins_when_api_answers() {
        let accessor = FakeAccessor::new().with_response(
            PROMETHEUS_API_PATH,
            json!({ "spec": { "replicas": 2 }, "status": { "availableReplicas": 2 } }),
        );

        let result = prometheus_health().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(
            result.metadata.get("strategy").map(String::as_str),
            Some("monitoring-api")
        );
    }

    #[test]
    fn falls_back_to_statefulset_when_api_is_missing() {
        let accessor = FakeAccessor::new().with_response(
            PROMETHEUS_STS_PATH,
            json!({ "spec": { "replicas": 2 }, "status": { "readyReplicas": 1 } }),
        );

        let result = prometheus_health().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(
            result.metadata.get("strategy").map(String::as_str),
            Some("statefulset")
        );
    }

    #[test]
    fn falls_back_to_cli_as_last_resort() {
        let pods = json!({ "items": [
            { "status": { "phase": "Running" } },
            { "status": { "phase": "Running" } },
        ]});
        let accessor = FakeAccessor::new().with_exec_output(&pods.to_string());

        let result = prometheus_health().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.metadata.get("strategy").map(String::as_str), Some("cli"));
    }

    #[test]
    fn all_strategies_failing_is_an_error() {
        let accessor = FakeAccessor::new();
        let error = prometheus_health().run(&accessor).unwrap_err();
        assert!(error.to_string().contains("all acquisition strategies failed"));
    }

    #[test]
    fn alertmanager_single_replica_is_warning() {
        let accessor = FakeAccessor::new().with_response(
            ALERTMANAGER_STS_PATH,
            json!({ "status": { "readyReplicas": 1 } }),
        );

        let result = alertmanager_replicas().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Warning);
    }

    #[test]
    fn alertmanager_zero_replicas_is_critical() {
        let accessor = FakeAccessor::new().with_response(
            ALERTMANAGER_STS_PATH,
            json!({ "status": { "readyReplicas": 0 } }),
        );

        let result = alertmanager_replicas().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Critical);
    }
}
