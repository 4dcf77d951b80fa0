//! Rendering of scan results.

use std::fmt::{self, Write as _};
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ScanResult;
use crate::{Result, ScanError};

/// Output format for a scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per issue, for humans.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// A YAML document.
    Yaml,
}

impl OutputFormat {
    /// The lowercase name of this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(ScanError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Renders a [`ScanResult`] in a fixed format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a reporter for `format`.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The format this reporter renders.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render `result` to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, result: &ScanResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(result)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
            OutputFormat::Text => Ok(render_text(result)),
        }
    }

    /// Render `result` into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to(&self, result: &ScanResult, mut writer: impl io::Write) -> Result<()> {
        writer.write_all(self.render(result)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn render_text(result: &ScanResult) -> String {
    if result.issues.is_empty() {
        return format!("{}\n", result.summary);
    }

    let mut out = String::new();
    for issue in &result.issues {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "[WARNING] {}/{} (container: {}) {}",
            issue.namespace, issue.pod_name, issue.container_name, issue.message
        );
        if let Some(recommendation) = &issue.recommendation {
            let _ = writeln!(out, "  Recommendation: {recommendation}");
        }
    }
    if result.exit_code != 0 {
        out.push_str("Issues found. Exiting with status code 1.\n");
    }
    out
}
