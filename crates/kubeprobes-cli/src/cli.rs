//! Command-line definition.
//!
//! The command tree is built fresh for every invocation through [`Cli`] or
//! [`command`], so parsing carries no process-wide state.

use std::time::Duration;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use kubeprobes_scanner::{ClusterOptions, OutputFormat, ScanOptions};

const ABOUT: &str = "Kubeprobes is a CLI tool for scanning Kubernetes probes";

const LONG_ABOUT: &str = "\
Kubeprobes is a CLI tool for scanning Kubernetes workloads to detect
missing liveness, readiness, and startup probes.

Health check probes are critical for:
  - Liveness probes: detect when to restart containers
  - Readiness probes: control traffic routing to healthy containers
  - Startup probes: handle slow-starting containers gracefully";

const EXAMPLES: &str = "\
Examples:
  # Quick scan of the default namespace
  kubeprobes scan

  # Scan with detailed recommendations
  kubeprobes scan --recommendation

  # Grouped short flags
  kubeprobes scan -rp liveness

  # Scan every namespace and fail the build on findings
  kubeprobes scan -A -f -o json

  # Check tool version
  kubeprobes version";

/// Kubeprobes - scan Kubernetes workloads for missing health-check probes.
#[derive(Parser, Debug)]
#[command(name = "kubeprobes")]
#[command(author, version, about = ABOUT, long_about = LONG_ABOUT, after_help = EXAMPLES)]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true, env = "KUBEPROBES_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan Kubernetes workloads for probes.
    #[command(long_about = "\
Scan Kubernetes workloads for missing liveness, readiness, or startup probes.

Exit codes:
  0: No issues found, or issues found without --fail-on-warn
  1: Probe issues found with --fail-on-warn, or an error occurred")]
    Scan(ScanArgs),

    /// Print the version information.
    Version(VersionArgs),

    /// Generate a shell completion script.
    Completion {
        /// Shell to generate the script for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags of the `scan` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Path to the kubeconfig file. If not provided, uses default kubeconfig location.
    #[arg(short = 'k', long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use. If not provided, uses current context.
    #[arg(short = 'c', long = "kubeContext")]
    pub kube_context: Option<String>,

    /// Kubernetes namespace to scan. Use --all-namespaces to scan all namespaces.
    #[arg(short = 'n', long, default_value = "default")]
    pub namespace: String,

    /// Scan all namespaces instead of a specific namespace.
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,

    /// Type of probe to scan for: liveness, readiness, startup. If not provided, scans all types.
    #[arg(short = 'p', long)]
    pub probe_type: Option<String>,

    /// Show detailed recommendations for missing probes.
    #[arg(short = 'r', long)]
    pub recommendation: bool,

    /// Output format: text, json, or yaml.
    #[arg(short = 'o', long, default_value = "text")]
    pub output: String,

    /// Exit with code 1 if warnings are found (treats warnings as failures).
    #[arg(short = 'f', long)]
    pub fail_on_warn: bool,

    /// Timeout in seconds for the pod list request.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl ScanArgs {
    /// Validate probe type and output format before touching the cluster.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown probe type or output format.
    pub fn validate(&self) -> kubeprobes_scanner::Result<(ScanOptions, OutputFormat)> {
        let format = self.output.parse()?;
        let options = ScanOptions::from_flags(
            &self.namespace,
            self.all_namespaces,
            self.probe_type.as_deref().unwrap_or_default(),
            self.recommendation,
            self.fail_on_warn,
        )?;
        Ok((options, format))
    }

    /// Cluster connection settings.
    #[must_use]
    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            kubeconfig: self.kubeconfig.clone().filter(|p| !p.is_empty()),
            context: self.kube_context.clone().filter(|c| !c.is_empty()),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Flags of the `version` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short = 'o', long, value_enum, default_value_t = VersionFormat::Default)]
    pub output: VersionFormat,
}

/// Output format of the `version` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFormat {
    /// Version, commit, and build date on separate lines.
    Default,
    /// Version number only.
    Short,
    /// A single JSON object.
    Json,
}

/// Build a fresh command tree.
#[must_use]
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeprobes_scanner::{NamespaceScope, ProbeFilter, ProbeKind};

    fn scan_args(args: &[&str]) -> ScanArgs {
        let mut argv = vec!["kubeprobes", "scan"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Scan(args) => args,
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn command_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn scan_defaults() {
        let args = scan_args(&[]);
        assert_eq!(args.namespace, "default");
        assert_eq!(args.output, "text");
        assert!(args.probe_type.is_none());
        assert!(!args.all_namespaces && !args.recommendation && !args.fail_on_warn);

        let (options, format) = args.validate().unwrap();
        assert_eq!(options.scope, NamespaceScope::Namespace("default".to_string()));
        assert_eq!(options.filter, ProbeFilter::All);
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(args.cluster_options(), ClusterOptions::default());
    }

    #[test]
    fn grouped_short_flags() {
        let args = scan_args(&["-rp", "liveness", "-Af"]);
        assert!(args.recommendation);
        assert!(args.all_namespaces);
        assert!(args.fail_on_warn);
        assert_eq!(args.probe_type.as_deref(), Some("liveness"));

        let (options, _) = args.validate().unwrap();
        assert_eq!(options.scope, NamespaceScope::All);
        assert_eq!(options.filter, ProbeFilter::Only(ProbeKind::Liveness));
    }

    #[test]
    fn long_flags_with_equals() {
        let args = scan_args(&[
            "--kubeconfig=/tmp/config",
            "--kubeContext",
            "prod",
            "--namespace=test",
            "--probe-type=Readiness",
            "--output",
            "yaml",
            "--timeout",
            "15",
        ]);

        let cluster = args.cluster_options();
        assert_eq!(cluster.kubeconfig.as_deref(), Some("/tmp/config"));
        assert_eq!(cluster.context.as_deref(), Some("prod"));
        assert_eq!(cluster.timeout, Some(Duration::from_secs(15)));

        let (options, format) = args.validate().unwrap();
        assert_eq!(options.scope.label(), "test");
        assert_eq!(options.filter, ProbeFilter::Only(ProbeKind::Readiness));
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn empty_probe_type_means_all() {
        let (options, _) = scan_args(&["-p", ""]).validate().unwrap();
        assert_eq!(options.filter, ProbeFilter::All);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = scan_args(&["-p", "bogus"]).validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("invalid probe type: bogus"));

        let err = scan_args(&["-o", "xml"]).validate().unwrap_err();
        assert!(err.to_string().starts_with("invalid output format: xml"));
    }

    #[test]
    fn version_output_flag() {
        let cli = Cli::try_parse_from(["kubeprobes", "version", "-o", "json"]).unwrap();
        match cli.command {
            Command::Version(args) => assert_eq!(args.output, VersionFormat::Json),
            other => panic!("expected version, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["kubeprobes", "version", "--output", "xml"]).is_err());
    }

    #[test]
    fn global_debug_flag() {
        let cli = Cli::try_parse_from(["kubeprobes", "scan", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["kubeprobes"]).is_err());
        assert!(Cli::try_parse_from(["kubeprobes", "completion", "bash"]).is_ok());
    }

    #[test]
    fn kubeconfig_flag_has_no_env_binding() {
        let command = command();
        let scan = command.find_subcommand("scan").unwrap();
        let kubeconfig = scan
            .get_arguments()
            .find(|arg| arg.get_id() == "kubeconfig")
            .unwrap();
        assert!(kubeconfig.get_env().is_none());

        let args = scan_args(&[]);
        assert!(args.kubeconfig.is_none());
        assert!(args.cluster_options().kubeconfig.is_none());
    }
}
