//! Error types for the scanner crate.

use thiserror::Error;

/// Errors that can occur while scanning pods or reporting results.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The probe-type filter is not one of the recognized kinds.
    #[error("invalid probe type: {0}. Valid types are: liveness, readiness, startup")]
    InvalidProbeType(String),

    /// The output format is not one of the recognized formats.
    #[error("invalid output format: {0}. Valid formats are: text, json, yaml")]
    InvalidOutputFormat(String),

    /// The kubeconfig file or context could not be loaded.
    #[error("error loading kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// No usable cluster configuration could be inferred.
    #[error("error inferring cluster configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    /// Kubernetes API error.
    #[error("Kubernetes API error: {0}")]
    KubeApi(#[from] kube::Error),

    /// The pod list call did not finish in time.
    #[error("timed out listing pods after {0}s")]
    Timeout(u64),

    /// JSON serialization failed.
    #[error("error marshaling to JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("error marshaling to YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Writing the report failed.
    #[error("error writing output: {0}")]
    Io(#[from] std::io::Error),

    /// Probe issues were found and the fail-on-warn policy is active.
    #[error("probe issues found")]
    IssuesFound {
        /// Number of issues in the scan result.
        count: usize,
    },
}

impl ScanError {
    /// Check if this error was raised while validating input, before any I/O.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidProbeType(_) | Self::InvalidOutputFormat(_))
    }

    /// Check if this error only signals that issues were found.
    #[must_use]
    pub fn is_issues_found(&self) -> bool {
        matches!(self, Self::IssuesFound { .. })
    }
}

/// A specialized Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
