//! Core configuration and error handling for churnscope.
//!
//! This crate provides the shared foundation used by the analysis crate and
//! the binary:
//! - [`ChurnError`] — unified error type using `thiserror`
//! - [`ChurnConfig`] — configuration loaded from `.churnscope.toml`

mod config;
mod error;

pub use config::{AnalysisConfig, ChurnConfig, ReportConfig, WindowConfig};
pub use error::ChurnError;

/// A convenience `Result` type for churnscope operations.
pub type Result<T> = std::result::Result<T, ChurnError>;
