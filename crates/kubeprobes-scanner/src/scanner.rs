//! Probe scanning.
//!
//! [`ProbeScanner`] lists pods once through a [`PodSource`] and reports every
//! container that lacks one of the requested probes.

use k8s_openapi::api::core::v1::Pod;
use tracing::debug;

use crate::k8s::PodSource;
use crate::types::{ProbeIssue, ScanOptions, ScanResult};
use crate::Result;

const UNKNOWN_NAME: &str = "<unknown>";

/// Scans the pods of a cluster for missing probes.
pub struct ProbeScanner<S> {
    source: S,
    options: ScanOptions,
}

impl<S: PodSource> ProbeScanner<S> {
    /// Create a scanner over `source` with validated options.
    #[must_use]
    pub fn new(source: S, options: ScanOptions) -> Self {
        Self { source, options }
    }

    /// Get a reference to the scan options.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Get a reference to the pod source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// List pods and check every container for missing probes.
    ///
    /// An empty pod list produces a result with no issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the pod list cannot be fetched.
    pub async fn scan(&self) -> Result<ScanResult> {
        let scope = &self.options.scope;
        let pods = self.source.list_pods(scope).await?;

        let issues = self.check_pods(&pods);

        debug!(
            scope = %scope,
            pods = pods.len(),
            issues = issues.len(),
            "Probe scan complete"
        );

        Ok(ScanResult::new(
            scope,
            issues,
            !pods.is_empty(),
            self.options.fail_on_warn,
        ))
    }

    /// Check `pods` against the configured filter, preserving pod and container order.
    #[must_use]
    pub fn check_pods(&self, pods: &[Pod]) -> Vec<ProbeIssue> {
        let mut issues = Vec::new();

        for pod in pods {
            let namespace = pod
                .metadata
                .namespace
                .as_deref()
                .unwrap_or_else(|| self.options.scope.label());
            let pod_name = pod.metadata.name.as_deref().unwrap_or(UNKNOWN_NAME);

            let Some(spec) = pod.spec.as_ref() else {
                debug!(namespace, pod_name, "Pod has no spec, skipping");
                continue;
            };

            for container in &spec.containers {
                for kind in self.options.filter.kinds() {
                    if kind.probe_of(container).is_none() {
                        issues.push(ProbeIssue::missing(
                            namespace,
                            pod_name,
                            &container.name,
                            kind,
                            self.options.recommendations,
                        ));
                    }
                }
            }
        }

        issues
    }
}
