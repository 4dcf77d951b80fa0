//! The `version` subcommand.

use serde::Serialize;

use crate::cli::VersionFormat;

/// Build metadata baked in at compile time.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// Crate version.
    pub version: &'static str,
    /// Source commit, from `KUBEPROBES_COMMIT`.
    pub commit: &'static str,
    /// Build date, from `KUBEPROBES_BUILD_DATE`.
    pub date: &'static str,
}

impl VersionInfo {
    /// Metadata of the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("KUBEPROBES_COMMIT").unwrap_or("unknown"),
            date: option_env!("KUBEPROBES_BUILD_DATE").unwrap_or("unknown"),
        }
    }

    /// Render the metadata in `format`, with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: VersionFormat) -> serde_json::Result<String> {
        Ok(match format {
            VersionFormat::Short => format!("{}\n", self.version),
            VersionFormat::Json => format!("{}\n", serde_json::to_string(self)?),
            VersionFormat::Default => format!(
                "kubeprobes version {}\nCommit: {}\nDate: {}\n",
                self.version, self.commit, self.date
            ),
        })
    }
}
