//! The `scan` subcommand.

use std::io::Write;

use anyhow::Context;
use kubeprobes_scanner::{
    KubePodSource, OutputFormat, PodSource, ProbeScanner, Reporter, ScanOptions,
};

use crate::cli::ScanArgs;

/// Validate flags, connect to the cluster, scan, and write the report to `out`.
///
/// # Errors
///
/// Returns validation, connection, or list errors, and
/// [`kubeprobes_scanner::ScanError::IssuesFound`] when issues were found with
/// fail-on-warn set.
pub async fn run(args: &ScanArgs, out: impl Write) -> anyhow::Result<()> {
    let (options, format) = args.validate()?;

    let source = KubePodSource::connect(args.cluster_options())
        .await
        .context("error creating kubernetes client")?;

    execute(source, options, format, out).await
}

/// Scan `source` and write the report to `out`.
///
/// # Errors
///
/// See [`run`].
pub async fn execute<S: PodSource>(
    source: S,
    options: ScanOptions,
    format: OutputFormat,
    out: impl Write,
) -> anyhow::Result<()> {
    tracing::debug!(
        scope = %options.scope,
        filter = ?options.filter,
        %format,
        "Starting probe scan"
    );

    let result = ProbeScanner::new(source, options)
        .scan()
        .await
        .context("error listing pods")?;

    Reporter::new(format).write_to(&result, out)?;

    result.into_outcome()?;
    Ok(())
}
