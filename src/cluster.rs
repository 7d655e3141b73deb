//! Cluster access collaborator
//!
//! Checks talk to the cluster through the narrow [`ClusterAccessor`]
//! capability; the engine itself never touches it. The shipped
//! implementation shells out to `oc` with an explicit kubeconfig, the same
//! way the tool is expected to be run from an operator workstation.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context};

use crate::error::{AuditError, AuditResult};

/// Narrow capability that checks use to query the cluster.
pub trait ClusterAccessor: Send + Sync {
    /// GET an API path (e.g. `/apis/config.openshift.io/v1/clusterversions`)
    /// and return the parsed JSON body.
    fn get_raw(&self, path: &str) -> anyhow::Result<serde_json::Value>;

    /// Run a cluster CLI command and return its stdout. Last-resort
    /// acquisition strategy for data no API exposes cleanly.
    fn exec(&self, args: &[&str]) -> anyhow::Result<String>;
}

/// Resolve the kubeconfig used for the run.
///
/// `$KUBECONFIG` wins; otherwise `~/.kube/config`. Absence is a fatal
/// pre-run error - no check is ever dispatched without cluster access.
pub fn resolve_kubeconfig() -> AuditResult<PathBuf> {
    if let Ok(path) = std::env::var("KUBECONFIG") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(AuditError::NoClusterAccess {
            reason: format!("KUBECONFIG points at missing file {}", path.display()),
        });
    }

    let home = dirs::home_dir().ok_or_else(|| AuditError::NoClusterAccess {
        reason: "could not determine home directory".to_string(),
    })?;
    let default = home.join(".kube").join("config");
    if default.is_file() {
        return Ok(default);
    }

    Err(AuditError::NoClusterAccess {
        reason: format!("no kubeconfig at {} and KUBECONFIG is unset", default.display()),
    })
}

/// Accessor backed by the `oc` CLI.
pub struct OcAccessor {
    kubeconfig: PathBuf,
}

impl OcAccessor {
    pub fn new(kubeconfig: impl Into<PathBuf>) -> Self {
        OcAccessor {
            kubeconfig: kubeconfig.into(),
        }
    }

    pub fn kubeconfig(&self) -> &Path {
        &self.kubeconfig
    }

    fn run_oc(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = Command::new("oc")
            .arg("--kubeconfig")
            .arg(&self.kubeconfig)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .context("failed to spawn oc - is it installed and on PATH?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "oc {} failed: {}",
                args.join(" "),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ClusterAccessor for OcAccessor {
    fn get_raw(&self, path: &str) -> anyhow::Result<serde_json::Value> {
        let body = self.run_oc(&["get", "--raw", path])?;
        serde_json::from_str(&body).with_context(|| format!("invalid JSON from GET {path}"))
    }

    fn exec(&self, args: &[&str]) -> anyhow::Result<String> {
        self.run_oc(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Both tests mutate KUBECONFIG; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn resolve_uses_kubeconfig_env_when_file_exists() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("kubeconfig");
        fs::write(&path, "apiVersion: v1\n").unwrap();

        std::env::set_var("KUBECONFIG", &path);
        let resolved = resolve_kubeconfig().unwrap();
        std::env::remove_var("KUBECONFIG");

        assert_eq!(resolved, path);
    }

    #[test]
    fn resolve_fails_when_kubeconfig_env_is_dangling() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        std::env::set_var("KUBECONFIG", &missing);
        let err = resolve_kubeconfig().unwrap_err();
        std::env::remove_var("KUBECONFIG");

        assert!(matches!(err, AuditError::NoClusterAccess { .. }));
    }
}
