use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChurnError;

/// Top-level configuration loaded from `.churnscope.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use churnscope_core::ChurnConfig;
///
/// let config = ChurnConfig::default();
/// assert_eq!(config.report.top_targets, 10);
/// assert_eq!(config.window.after, "1 week ago");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChurnConfig {
    /// Time window for the log query.
    #[serde(default)]
    pub window: WindowConfig,
    /// What counts as a qualifying source file.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report truncation and verbosity.
    #[serde(default)]
    pub report: ReportConfig,
}

impl ChurnConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::Io`] if the file cannot be read, or
    /// [`ChurnError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use churnscope_core::ChurnConfig;
    /// use std::path::Path;
    ///
    /// let config = ChurnConfig::from_file(Path::new(".churnscope.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, ChurnError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use churnscope_core::ChurnConfig;
    ///
    /// let toml = r#"
    /// [report]
    /// top_targets = 25
    /// "#;
    /// let config = ChurnConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.report.top_targets, 25);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ChurnError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Time window handed verbatim to the git log query.
///
/// Both bounds accept any expression git itself understands
/// (`"1 week ago"`, `"2026-01-01"`, `"yesterday"`).
///
/// # Examples
///
/// ```
/// use churnscope_core::WindowConfig;
///
/// let window = WindowConfig::default();
/// assert_eq!(window.after, "1 week ago");
/// assert!(window.before.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Inspect commits after this time (default: `"1 week ago"`).
    #[serde(default = "default_after")]
    pub after: String,
    /// Inspect commits before this time (default: now, resolved at run time).
    pub before: Option<String>,
}

fn default_after() -> String {
    "1 week ago".into()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            after: default_after(),
            before: None,
        }
    }
}

/// File-qualification settings for the churn scorer.
///
/// # Examples
///
/// ```
/// use churnscope_core::AnalysisConfig;
///
/// let analysis = AnalysisConfig::default();
/// assert!(analysis.extensions.iter().any(|e| e == "go"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// File extensions (without the dot) that count toward churn.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["c".into(), "h".into(), "go".into(), "rs".into()]
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Report truncation and verbosity settings.
///
/// # Examples
///
/// ```
/// use churnscope_core::ReportConfig;
///
/// let report = ReportConfig::default();
/// assert_eq!(report.top_targets, 10);
/// assert_eq!(report.top_reasons, 3);
/// assert!(!report.detail);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show at most this many targets (default: 10).
    #[serde(default = "default_top_targets")]
    pub top_targets: usize,
    /// Show at most this many reasons per target (default: 3).
    #[serde(default = "default_top_reasons")]
    pub top_reasons: usize,
    /// Show single-count reasons and per-commit lines (default: false).
    #[serde(default)]
    pub detail: bool,
}

fn default_top_targets() -> usize {
    10
}

fn default_top_reasons() -> usize {
    3
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_targets: default_top_targets(),
            top_reasons: default_top_reasons(),
            detail: false,
        }
    }
}
