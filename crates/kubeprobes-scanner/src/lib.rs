//! Kubernetes probe scanner.
//!
//! This crate finds containers that have no liveness, readiness, or startup
//! probe configured. It handles:
//!
//! - Cluster access through kubeconfig, context override, or in-cluster config
//! - A single pod list per scan, namespaced or cluster-wide
//! - Per-container probe checks with optional recommendations
//! - Text, JSON, and YAML reports with an exit-code policy
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 kubeprobes CLI               │
//! └──────────────────────────────────────────────┘
//!                        │ ScanOptions
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │                 ProbeScanner                 │
//! │   ┌──────────────┐      ┌──────────────┐     │
//! │   │  PodSource   │ ───▶ │ check_pods   │     │
//! │   └──────────────┘      └──────────────┘     │
//! └──────────────────────────────────────────────┘
//!                        │ ScanResult
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │            Reporter (text/json/yaml)         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kubeprobes_scanner::{
//!     ClusterOptions, KubePodSource, OutputFormat, ProbeScanner, Reporter, ScanOptions,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ScanOptions::from_flags("default", false, "liveness", true, false)?;
//! let source = KubePodSource::connect(ClusterOptions::default()).await?;
//!
//! let result = ProbeScanner::new(source, options).scan().await?;
//! Reporter::new(OutputFormat::Json).write_to(&result, std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! For testing without a real Kubernetes cluster, enable the `test-utils` feature
//! and use the static pod source:
//!
//! ```ignore
//! use kubeprobes_scanner::{ProbeScanner, ScanOptions, StaticPodSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = ProbeScanner::new(StaticPodSource::new(vec![]), ScanOptions::default());
//! let result = scanner.scan().await?;
//! assert!(result.issues.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod k8s;
pub mod report;
pub mod scanner;
pub mod types;

pub use error::{Result, ScanError};
pub use k8s::{KubePodSource, PodSource};
pub use report::{OutputFormat, Reporter};
pub use scanner::ProbeScanner;
pub use types::{
    ClusterOptions, NamespaceScope, ProbeFilter, ProbeIssue, ProbeKind, ScanOptions, ScanResult,
};

#[cfg(any(test, feature = "test-utils"))]
pub use k8s::mock::StaticPodSource;
