//! Unified patch reduction.
//!
//! Reduces one commit's patch text to the added and removed lines that are
//! worth tracking for thrash detection. The filter is deliberately
//! language-agnostic: it keeps call sites, `if`/`for` heads, and
//! assignments, and drops comments and formatting noise. Loose as it is,
//! it applies identically to every source language, and that looseness is
//! what makes the thrash signal comparable across files.

/// Filtered added/removed lines for a single commit.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::patch::CommitPatch;
///
/// let patch = CommitPatch {
///     added: vec!["if (ready)".into()],
///     removed: vec![],
/// };
/// assert_eq!(patch.added.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPatch {
    /// Useful lines added by the commit, trimmed, in patch order.
    pub added: Vec<String>,
    /// Useful lines removed by the commit, trimmed, in patch order.
    pub removed: Vec<String>,
}

/// Extract useful added/removed lines from unified diff text.
///
/// A line qualifies as added/removed only when it begins with exactly one
/// `+`/`-`; the doubled forms (`+++`, `---`) are file headers. Qualifying
/// lines are trimmed, comment lines (leading `/` or `*`) are dropped, and
/// the rest must pass [`is_useful_line`].
///
/// # Examples
///
/// ```
/// use churnscope_pulse::patch::extract_lines;
///
/// let diff = "+++ b/a.c\n+if (x) {\n+/* comment */\n-total = 0;\n";
/// let patch = extract_lines(diff);
/// assert_eq!(patch.added, vec!["if (x) {"]);
/// assert_eq!(patch.removed, vec!["total = 0;"]);
/// ```
pub fn extract_lines(diff: &str) -> CommitPatch {
    let mut patch = CommitPatch::default();

    for line in diff.lines() {
        if let Some(body) = strip_marker(line, '+') {
            if let Some(useful) = filter_line(body) {
                patch.added.push(useful.to_string());
            }
        } else if let Some(body) = strip_marker(line, '-') {
            if let Some(useful) = filter_line(body) {
                patch.removed.push(useful.to_string());
            }
        }
    }

    patch
}

/// Strip a single leading `marker`, rejecting the doubled header form and
/// the bare marker with no content.
fn strip_marker(line: &str, marker: char) -> Option<&str> {
    let body = line.strip_prefix(marker)?;
    let first = body.chars().next()?;
    if first == marker {
        return None;
    }
    Some(body)
}

fn filter_line(body: &str) -> Option<&str> {
    let trimmed = body.trim();
    // ignore comments
    if trimmed.starts_with('/') || trimmed.starts_with('*') {
        return None;
    }
    if !is_useful_line(trimmed) {
        return None;
    }
    Some(trimmed)
}

/// Heuristic for "structurally interesting" source lines.
///
/// Keeps lines containing an identifier immediately followed by `(` (a call
/// or definition), lines starting with `if ` or `for `, and lines containing
/// an assignment. Everything else is formatting or declaration churn that
/// would drown the thrash signal.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::patch::is_useful_line;
///
/// assert!(is_useful_line("submit(req)"));
/// assert!(is_useful_line("if (foo)"));
/// assert!(is_useful_line("count = 0"));
/// assert!(!is_useful_line("}"));
/// ```
pub fn is_useful_line(line: &str) -> bool {
    if line.starts_with("if ") || line.starts_with("for ") {
        return true;
    }
    if line.contains('=') {
        return true;
    }
    let bytes = line.as_bytes();
    bytes
        .windows(2)
        .any(|w| (w[0].is_ascii_alphanumeric() || w[0] == b'_') && w[1] == b'(')
}
