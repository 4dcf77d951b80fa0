//! Types for the scanner crate.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use k8s_openapi::api::core::v1::{Container, Probe};
use serde::{Deserialize, Serialize};

use crate::{Result, ScanError};

/// Kind of health-check probe attached to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Detects when a container must be restarted.
    Liveness,
    /// Controls whether a container receives traffic.
    Readiness,
    /// Guards slow-starting containers.
    Startup,
}

impl ProbeKind {
    /// All probe kinds, in the order they are checked.
    pub const ALL: [Self; 3] = [Self::Liveness, Self::Readiness, Self::Startup];

    /// The lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liveness => "liveness",
            Self::Readiness => "readiness",
            Self::Startup => "startup",
        }
    }

    /// The issue message for a container missing this kind of probe.
    #[must_use]
    pub fn missing_message(self) -> String {
        format!("missing {} probe", self.as_str())
    }

    /// The advisory attached to an issue when recommendations are enabled.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Liveness => "Add a liveness probe to ensure the container is running correctly.",
            Self::Readiness => {
                "Add a readiness probe to ensure the container is ready to accept traffic."
            }
            Self::Startup => "Add a startup probe to ensure the container has started successfully.",
        }
    }

    /// The probe of this kind configured on `container`, if any.
    #[must_use]
    pub fn probe_of(self, container: &Container) -> Option<&Probe> {
        match self {
            Self::Liveness => container.liveness_probe.as_ref(),
            Self::Readiness => container.readiness_probe.as_ref(),
            Self::Startup => container.startup_probe.as_ref(),
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "liveness" => Ok(Self::Liveness),
            "readiness" => Ok(Self::Readiness),
            "startup" => Ok(Self::Startup),
            _ => Err(ScanError::InvalidProbeType(s.to_string())),
        }
    }
}

/// Which probe kinds a scan checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeFilter {
    /// Check every kind.
    #[default]
    All,
    /// Check a single kind.
    Only(ProbeKind),
}

impl ProbeFilter {
    /// Check if the filter selects `kind`.
    #[must_use]
    pub fn includes(self, kind: ProbeKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }

    /// The selected kinds, in check order.
    pub fn kinds(self) -> impl Iterator<Item = ProbeKind> {
        ProbeKind::ALL.into_iter().filter(move |k| self.includes(*k))
    }
}

/// Parses a filter the way the `--probe-type` flag accepts it: case-insensitive,
/// with the empty string selecting every kind.
impl FromStr for ProbeFilter {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Namespace selection for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    /// A single named namespace.
    Namespace(String),
    /// Every namespace in the cluster.
    All,
}

impl NamespaceScope {
    /// Build a scope from the namespace flag and the all-namespaces switch.
    ///
    /// An empty namespace name is treated as all namespaces.
    #[must_use]
    pub fn new(namespace: &str, all_namespaces: bool) -> Self {
        if all_namespaces || namespace.is_empty() {
            Self::All
        } else {
            Self::Namespace(namespace.to_string())
        }
    }

    /// The human-readable label used in summaries.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Namespace(name) => name,
            Self::All => "all namespaces",
        }
    }
}

impl Default for NamespaceScope {
    fn default() -> Self {
        Self::Namespace("default".to_string())
    }
}

impl fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A container missing one expected probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeIssue {
    /// Namespace of the pod.
    pub namespace: String,
    /// Name of the pod.
    pub pod_name: String,
    /// Name of the container within the pod.
    pub container_name: String,
    /// Which probe is missing.
    pub probe_type: ProbeKind,
    /// Human-readable description of the issue.
    pub message: String,
    /// Advisory text, present when recommendations are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl ProbeIssue {
    /// Create an issue for a container missing a probe of `kind`.
    #[must_use]
    pub fn missing(
        namespace: impl Into<String>,
        pod_name: impl Into<String>,
        container_name: impl Into<String>,
        kind: ProbeKind,
        with_recommendation: bool,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            pod_name: pod_name.into(),
            container_name: container_name.into(),
            probe_type: kind,
            message: kind.missing_message(),
            recommendation: with_recommendation.then(|| kind.recommendation().to_string()),
        }
    }
}

/// The outcome of a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Issues in pod and container enumeration order.
    pub issues: Vec<ProbeIssue>,
    /// One-line summary of the scan.
    pub summary: String,
    /// Label of the scanned scope.
    pub namespace: String,
    /// Process exit code derived from the issues and the fail-on-warn policy.
    pub exit_code: i32,
}

impl ScanResult {
    /// Build a result for `scope`, deriving summary and exit code.
    ///
    /// `pods_found` distinguishes an empty cluster from a clean one in the summary.
    #[must_use]
    pub fn new(
        scope: &NamespaceScope,
        issues: Vec<ProbeIssue>,
        pods_found: bool,
        fail_on_warn: bool,
    ) -> Self {
        let label = scope.label();
        let summary = if !pods_found {
            format!("No pods found in {label}")
        } else if issues.is_empty() {
            format!("No probe issues found in {label}")
        } else {
            format!("Found {} probe issues in {label}", issues.len())
        };
        let exit_code = i32::from(!issues.is_empty() && fail_on_warn);

        Self {
            issues,
            summary,
            namespace: label.to_string(),
            exit_code,
        }
    }

    /// Check if the scan found any issues.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Convert the exit code into a result for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::IssuesFound`] when the exit code is non-zero.
    pub fn into_outcome(self) -> Result<Self> {
        if self.exit_code == 0 {
            Ok(self)
        } else {
            Err(ScanError::IssuesFound {
                count: self.issues.len(),
            })
        }
    }
}

/// Validated scan settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Namespace selection.
    pub scope: NamespaceScope,
    /// Probe kinds to check.
    pub filter: ProbeFilter,
    /// Attach recommendations to issues.
    pub recommendations: bool,
    /// Treat issues as failures in the exit code.
    pub fail_on_warn: bool,
}

impl ScanOptions {
    /// Build options from raw flag values.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidProbeType`] if `probe_type` is not recognized.
    pub fn from_flags(
        namespace: &str,
        all_namespaces: bool,
        probe_type: &str,
        recommendations: bool,
        fail_on_warn: bool,
    ) -> Result<Self> {
        Ok(Self {
            scope: NamespaceScope::new(namespace, all_namespaces),
            filter: probe_type.parse()?,
            recommendations,
            fail_on_warn,
        })
    }
}

/// How to reach the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Explicit kubeconfig path; the default loading rules apply when unset.
    pub kubeconfig: Option<String>,
    /// Context override; the current context is used when unset.
    pub context: Option<String>,
    /// Upper bound for the pod list call.
    pub timeout: Option<Duration>,
}
