//! Git history analysis: churn scoring and thrash detection.
//!
//! Mines a repository's commit history through the git CLI, scores per-file
//! and co-changed-group edit churn on a logarithmic scale, and replays each
//! candidate's patches to find lines that bounce between added and removed
//! across distinct commits. The surviving candidates are ranked into a
//! plain-text refactoring report.

pub mod git;
pub mod log;
pub mod patch;
pub mod report;
pub mod targets;
pub mod thrash;
