//! Networking checks: ingress capacity and cluster network MTU.

use std::sync::Arc;

use crate::check::Check;
use crate::cluster::ClusterAccessor;
use crate::models::{Category, CheckResult, ResultKey, Status};

const INGRESS_CONTROLLER_PATH: &str =
    "/apis/operator.openshift.io/v1/namespaces/openshift-ingress-operator/ingresscontrollers/default";
const NETWORK_PATH: &str = "/apis/operator.openshift.io/v1/networks/cluster";

/// Minimum MTU that still leaves room for common overlay encapsulation.
const MTU_FLOOR: u64 = 1280;

pub fn ingress_controller() -> Arc<dyn Check> {
    Arc::new(IngressControllerCheck)
}

pub fn cluster_network_mtu() -> Arc<dyn Check> {
    Arc::new(ClusterNetworkMtuCheck)
}

/// Compares the default ingress controller's available replicas to its
/// desired count.
struct IngressControllerCheck;

impl Check for IngressControllerCheck {
    fn id(&self) -> &str {
        "ingress-controller"
    }

    fn name(&self) -> &str {
        "Default ingress controller"
    }

    fn category(&self) -> Category {
        Category::from("Networking")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let controller = cluster.get_raw(INGRESS_CONTROLLER_PATH)?;
        let desired = controller
            .pointer("/spec/replicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(2);
        let available = controller
            .pointer("/status/availableReplicas")
            .and_then(|r| r.as_u64())
            .unwrap_or(0);

        let result = if available == 0 {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Critical,
                "no ingress controller replicas available - routes are down",
            )
            .with_key(ResultKey::Required)
            .with_recommendation("inspect pods in openshift-ingress")
        } else if available < desired {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("ingress running {available}/{desired} replicas"),
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("restore the desired ingress replica count")
        } else {
            CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("ingress running {available}/{desired} replicas"),
            )
        };

        Ok(result
            .with_metadata("desired", desired.to_string())
            .with_metadata("available", available.to_string()))
    }
}

/// Flags cluster network MTUs too small for overlay traffic.
struct ClusterNetworkMtuCheck;

impl Check for ClusterNetworkMtuCheck {
    fn id(&self) -> &str {
        "cluster-network-mtu"
    }

    fn name(&self) -> &str {
        "Cluster network MTU"
    }

    fn category(&self) -> Category {
        Category::from("Networking")
    }

    fn run(&self, cluster: &dyn ClusterAccessor) -> anyhow::Result<CheckResult> {
        let network = cluster.get_raw(NETWORK_PATH)?;
        let mtu = network
            .pointer("/status/clusterNetworkMTU")
            .and_then(|m| m.as_u64());

        let result = match mtu {
            Some(mtu) if mtu < MTU_FLOOR => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Warning,
                format!("cluster network MTU {mtu} is below the {MTU_FLOOR} floor"),
            )
            .with_key(ResultKey::Recommended)
            .with_recommendation("verify the underlay MTU and overlay overhead budget")
            .with_metadata("mtu", mtu.to_string()),
            Some(mtu) => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Ok,
                format!("cluster network MTU is {mtu}"),
            )
            .with_metadata("mtu", mtu.to_string()),
            None => CheckResult::new(
                self.id(),
                self.name(),
                self.category(),
                Status::Unknown,
                "network operator does not report an MTU",
            )
            .with_key(ResultKey::Advisory),
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::FakeAccessor;
    use serde_json::json;

    #[test]
    fn full_ingress_replicas_are_ok() {
        let accessor = FakeAccessor::new().with_response(
            INGRESS_CONTROLLER_PATH,
            json!({ "spec": { "replicas": 2 }, "status": { "availableReplicas": 2 } }),
        );

        let result = ingress_controller().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Ok);
    }

    #[test]
    fn partial_ingress_replicas_are_warning() {
        let accessor = FakeAccessor::new().with_response(
            INGRESS_CONTROLLER_PATH,
            json!({ "spec": { "replicas": 3 }, "status": { "availableReplicas": 1 } }),
        );

        let result = ingress_controller().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Warning);
        assert!(result.message.contains("1/3"));
    }

    #[test]
    fn zero_ingress_replicas_are_critical() {
        let accessor = FakeAccessor::new().with_response(
            INGRESS_CONTROLLER_PATH,
            json!({ "spec": { "replicas": 2 }, "status": { "availableReplicas": 0 } }),
        );

        let result = ingress_controller().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.result_key, ResultKey::Required);
    }

    #[test]
    fn low_mtu_is_warning() {
        let accessor = FakeAccessor::new().with_response(
            NETWORK_PATH,
            json!({ "status": { "clusterNetworkMTU": 1100 } }),
        );

        let result = cluster_network_mtu().run(&accessor).unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.metadata.get("mtu").map(String::as_str), Some("1100"));
    }

    #[test]
    fn healthy_mtu_is_ok_and_missing_is_unknown() {
        let accessor = FakeAccessor::new().with_response(
            NETWORK_PATH,
            json!({ "status": { "clusterNetworkMTU": 8900 } }),
        );
        assert_eq!(cluster_network_mtu().run(&accessor).unwrap().status, Status::Ok);

        let accessor = FakeAccessor::new().with_response(NETWORK_PATH, json!({ "status": {} }));
        assert_eq!(
            cluster_network_mtu().run(&accessor).unwrap().status,
            Status::Unknown
        );
    }
}
