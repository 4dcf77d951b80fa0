//! Kubeprobes CLI - scan Kubernetes workloads for missing probes.
//!
//! This is the entry point for the `kubeprobes` binary.

mod cli;
mod scan;
mod version;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;
use kubeprobes_scanner::ScanError;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use version::VersionInfo;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse arguments
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_failure_status(&e));
        }
    };

    // Initialize logging
    init_tracing(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(exit_status(&e)),
    }
}

/// Exit status for a parse outcome that stops the run.
///
/// Usage errors exit with 1 like every other failure; `--help` and
/// `--version` print to stdout and exit with 0.
fn parse_failure_status(err: &clap::Error) -> u8 {
    u8::from(err.use_stderr())
}

/// Install a stderr subscriber when `--debug` is set or `RUST_LOG` is defined.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("kubeprobes=debug,kubeprobes_scanner=debug,warn")
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();

    match args.command {
        Command::Scan(scan_args) => scan::run(&scan_args, stdout.lock()).await,
        Command::Version(version_args) => {
            let rendered = VersionInfo::current().render(version_args.output)?;
            stdout.lock().write_all(rendered.as_bytes())?;
            Ok(())
        }
        Command::Completion { shell } => {
            let mut command = cli::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut stdout.lock());
            Ok(())
        }
    }
}

/// Map a failed run to the process exit status, reporting real errors on stderr.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ScanError>() {
        Some(ScanError::IssuesFound { count }) => {
            tracing::debug!(count, "Probe issues found with fail-on-warn set");
        }
        _ => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("Error: {err:#}");
        }
    }
    1
}
