//! Churn scoring and target construction.
//!
//! Consumes the parsed commit sequence once and accumulates a base-10
//! order-of-magnitude edit score into one target per qualifying file, plus
//! one target per co-changed file group. The logarithmic scale compresses
//! huge mechanical diffs relative to small, frequent hand edits.

use std::collections::HashMap;
use std::path::Path;

use crate::log::Commit;

/// A refactoring candidate: a single file, or a comma-joined group of files
/// that changed together in at least one commit.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::targets::Target;
///
/// let target = Target {
///     name: "src/io.c,src/io.h".into(),
///     score: 6.0,
///     commits: vec![0],
///     reasons: vec![],
/// };
/// assert!(target.name.contains(','), "co-change groups join member paths");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Target {
    /// Single file path, or comma-joined commit-ordered path list.
    pub name: String,
    /// Accumulated churn score; multiplied by the thrash total later.
    pub score: f64,
    /// Member commits, as indices into the parsed commit sequence.
    pub commits: Vec<usize>,
    /// Thrashing lines, ranked by count after thrash detection.
    pub reasons: Vec<Reason>,
}

/// A line observed thrashing — added in one commit and removed in a
/// different one, or vice versa — within a target's commit set.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::targets::Reason;
///
/// let reason = Reason {
///     line: "if (foo)".into(),
///     count: 2,
/// };
/// assert!(reason.count >= 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    /// Exact (trimmed) line text.
    pub line: String,
    /// Number of thrash events observed for the line.
    pub count: u32,
}

/// Number of decimal digits in `n`: 1 line scores 1.0, 10 lines 2.0,
/// 100 lines 3.0, and an empty edit scores 0.0.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::targets::edit_magnitude;
///
/// assert_eq!(edit_magnitude(0), 0.0);
/// assert_eq!(edit_magnitude(9), 1.0);
/// assert_eq!(edit_magnitude(10), 2.0);
/// ```
pub fn edit_magnitude(n: u32) -> f64 {
    let mut n = n;
    let mut score = 0.0;
    while n >= 1 {
        score += 1.0;
        n /= 10;
    }
    score
}

/// Build the target map from the full commit sequence.
///
/// Every qualifying file accumulates its per-commit magnitude into a target
/// keyed by its path. When a commit touches two or more qualifying files,
/// an additional group target is keyed by the comma-joined path list (commit
/// order preserved) and scores the member sum multiplied by the file count,
/// rewarding wider co-changes. Both kinds record the commit as a member.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::log::{Commit, FileStat};
/// use churnscope_pulse::targets::build_targets;
///
/// let commit = Commit {
///     id: "abc".into(),
///     files: vec![
///         FileStat { path: "a.c".into(), added: 10, deleted: 0 },
///         FileStat { path: "b.c".into(), added: 1, deleted: 0 },
///     ],
///     ..Commit::default()
/// };
/// let targets = build_targets(&[commit], &["c".into()]);
/// assert_eq!(targets["a.c,b.c"].score, 6.0); // (2 + 1) × 2 files
/// ```
pub fn build_targets(commits: &[Commit], extensions: &[String]) -> HashMap<String, Target> {
    let mut targets: HashMap<String, Target> = HashMap::new();

    let mut record = |name: &str, commit_idx: usize, score: f64| {
        let target = targets.entry(name.to_string()).or_insert_with(|| Target {
            name: name.to_string(),
            ..Target::default()
        });
        target.score += score;
        target.commits.push(commit_idx);
    };

    for (idx, commit) in commits.iter().enumerate() {
        let mut group_files: Vec<&str> = Vec::new();
        let mut group_score = 0.0;

        for stat in &commit.files {
            if !qualifies(&stat.path, extensions) {
                continue;
            }
            let magnitude = edit_magnitude(stat.added + stat.deleted);

            group_files.push(&stat.path);
            group_score += magnitude;

            record(&stat.path, idx, magnitude);
        }

        if group_files.len() >= 2 {
            group_score *= group_files.len() as f64;
            let group_name = group_files.join(",");
            record(&group_name, idx, group_score);
        }
    }

    targets
}

fn qualifies(path: &str, extensions: &[String]) -> bool {
    let Some(ext) = Path::new(path).extension() else {
        return false;
    };
    extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::FileStat;

    fn make_commit(id: &str, files: Vec<(&str, u32, u32)>) -> Commit {
        Commit {
            id: id.into(),
            files: files
                .into_iter()
                .map(|(path, added, deleted)| FileStat {
                    path: path.into(),
                    added,
                    deleted,
                })
                .collect(),
            ..Commit::default()
        }
    }

    fn exts() -> Vec<String> {
        vec!["c".into(), "h".into(), "go".into()]
    }

    #[test]
    fn magnitude_counts_decimal_digits() {
        assert_eq!(edit_magnitude(0), 0.0);
        assert_eq!(edit_magnitude(1), 1.0);
        assert_eq!(edit_magnitude(9), 1.0);
        assert_eq!(edit_magnitude(10), 2.0);
        assert_eq!(edit_magnitude(99), 2.0);
        assert_eq!(edit_magnitude(100), 3.0);
        assert_eq!(edit_magnitude(1000), 4.0);
    }

    #[test]
    fn per_file_scores_accumulate_across_commits() {
        let commits = vec![
            make_commit("c1", vec![("a.c", 10, 5)]),
            make_commit("c2", vec![("a.c", 3, 0)]),
        ];
        let targets = build_targets(&commits, &exts());
        let a = &targets["a.c"];
        assert_eq!(a.score, 3.0); // 2.0 + 1.0
        assert_eq!(a.commits, vec![0, 1]);
    }

    #[test]
    fn unrecognized_extensions_are_ignored() {
        let commits = vec![make_commit("c1", vec![("README.md", 50, 0), ("a.c", 5, 0)])];
        let targets = build_targets(&commits, &exts());
        assert!(targets.contains_key("a.c"));
        assert!(!targets.contains_key("README.md"));
        assert_eq!(targets.len(), 1, "single qualifying file makes no group");
    }

    #[test]
    fn single_file_commit_creates_no_group() {
        let commits = vec![make_commit("c1", vec![("a.c", 5, 0)])];
        let targets = build_targets(&commits, &exts());
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn group_score_is_member_sum_times_file_count() {
        // magnitudes 2.0, 1.0, 3.0 over three files → (2+1+3) × 3 = 18
        let commits = vec![make_commit(
            "c1",
            vec![("a.c", 10, 5), ("b.h", 1, 0), ("c.go", 100, 50)],
        )];
        let targets = build_targets(&commits, &exts());
        let group = &targets["a.c,b.h,c.go"];
        assert_eq!(group.score, 18.0);
        assert_eq!(group.commits, vec![0]);
    }

    #[test]
    fn group_name_preserves_commit_order() {
        let commits = vec![make_commit("c1", vec![("z.c", 1, 0), ("a.c", 1, 0)])];
        let targets = build_targets(&commits, &exts());
        assert!(targets.contains_key("z.c,a.c"));
        assert!(!targets.contains_key("a.c,z.c"));
    }

    #[test]
    fn group_members_also_get_file_targets() {
        let commits = vec![make_commit("c1", vec![("a.c", 1, 0), ("b.c", 1, 0)])];
        let targets = build_targets(&commits, &exts());
        assert_eq!(targets.len(), 3);
        assert_eq!(targets["a.c"].score, 1.0);
        assert_eq!(targets["b.c"].score, 1.0);
        assert_eq!(targets["a.c,b.c"].score, 4.0);
    }

    #[test]
    fn zero_line_edit_scores_zero() {
        let commits = vec![make_commit("c1", vec![("a.c", 0, 0)])];
        let targets = build_targets(&commits, &exts());
        assert_eq!(targets["a.c"].score, 0.0);
        assert_eq!(targets["a.c"].commits.len(), 1);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let commits = vec![make_commit("c1", vec![("LEGACY.C", 5, 0)])];
        let targets = build_targets(&commits, &exts());
        assert!(targets.contains_key("LEGACY.C"));
    }
}
