/// Errors that can occur across churnscope.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette::Report` at the boundary.
///
/// # Examples
///
/// ```
/// use churnscope_core::ChurnError;
///
/// let err = ChurnError::Git("log query failed".into());
/// assert!(err.to_string().contains("log query failed"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ChurnError {
    /// Filesystem or process I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git invocation failure (non-zero exit, unreadable output).
    #[error("git error: {0}")]
    Git(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
