//! Ranking and plain-text report rendering.
//!
//! Pure formatting over already-validated data; nothing here can fail.

use std::cmp::Ordering;

use churnscope_core::ReportConfig;

use crate::log::Commit;
use crate::targets::Target;

/// Name column width in the target header line.
const NAME_WIDTH: usize = 40;

/// Drop zero-score targets and sort the rest for the report.
///
/// Ordering is descending by score; equal scores fall back to descending
/// member-commit count. A target with raw churn but no thrash events was
/// already multiplied down to zero, so it never survives this pass.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::targets::Target;
/// use churnscope_pulse::report::rank;
///
/// let targets = vec![
///     Target { name: "quiet.c".into(), score: 0.0, ..Target::default() },
///     Target { name: "busy.c".into(), score: 12.0, ..Target::default() },
/// ];
/// let ranked = rank(targets);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].name, "busy.c");
/// ```
pub fn rank(targets: Vec<Target>) -> Vec<Target> {
    let mut survivors: Vec<Target> = targets.into_iter().filter(|t| t.score > 0.0).collect();
    survivors.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.commits.len().cmp(&a.commits.len()))
    });
    survivors
}

/// Render the ranked targets as the final plain-text report.
///
/// One block per target up to `report.top_targets`: a header line with the
/// score, the (possibly ellipsized) name, and the member-commit count; then
/// up to `report.top_reasons` reason lines (singletons only in detail
/// mode); in detail mode also one line per member commit with the
/// abbreviated id, first message line, and author name. A trailing summary
/// counts all surviving targets and all parsed commits, not just the
/// displayed ones.
pub fn render(ranked: &[Target], commits: &[Commit], report: &ReportConfig) -> String {
    let mut out = String::new();

    for target in ranked.iter().take(report.top_targets) {
        out.push_str(&format!(
            "{:8.1} {:<40} {:4}\n",
            target.score,
            shorten(&target.name, NAME_WIDTH),
            target.commits.len(),
        ));
        for reason in target.reasons.iter().take(report.top_reasons) {
            if report.detail || reason.count > 1 {
                out.push_str(&format!("    {:4} {}\n", reason.count, reason.line));
            }
        }
        if report.detail {
            for &idx in &target.commits {
                let commit = &commits[idx];
                let first_line = commit.message.first().map_or("", String::as_str);
                out.push_str(&format!(
                    "         {} {} ({})\n",
                    abbreviate(&commit.id),
                    first_line,
                    commit.author.name,
                ));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "total targets: {}, total commits: {}\n",
        ranked.len(),
        commits.len(),
    ));
    out
}

/// Truncate `name` to `width` characters, ellipsizing with `...`.
///
/// A width below 3 leaves no room for the ellipsis and renders empty.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::report::shorten;
///
/// assert_eq!(shorten("short.c", 40), "short.c");
/// assert_eq!(shorten("abcdef", 5), "ab...");
/// assert_eq!(shorten("abcdef", 2), "");
/// ```
pub fn shorten(name: &str, width: usize) -> String {
    if width < 3 {
        return String::new();
    }
    if name.chars().count() > width {
        let mut cut: String = name.chars().take(width - 3).collect();
        cut.push_str("...");
        return cut;
    }
    name.to_string()
}

fn abbreviate(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Author;
    use crate::targets::Reason;

    fn make_target(name: &str, score: f64, members: Vec<usize>, reasons: Vec<(&str, u32)>) -> Target {
        Target {
            name: name.into(),
            score,
            commits: members,
            reasons: reasons
                .into_iter()
                .map(|(line, count)| Reason {
                    line: line.into(),
                    count,
                })
                .collect(),
        }
    }

    fn make_commit(id: &str, message: &str, author: &str) -> Commit {
        Commit {
            id: id.into(),
            message: vec![message.into()],
            author: Author {
                name: author.into(),
                email: format!("{author}@example.com"),
                timestamp: 1700000000,
            },
            ..Commit::default()
        }
    }

    #[test]
    fn rank_drops_zero_score_targets() {
        let targets = vec![
            make_target("a.c", 0.0, vec![0, 1, 2], vec![]),
            make_target("b.c", 4.0, vec![0], vec![]),
        ];
        let ranked = rank(targets);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "b.c");
    }

    #[test]
    fn rank_orders_by_score_descending() {
        let targets = vec![
            make_target("low.c", 2.0, vec![0], vec![]),
            make_target("high.c", 20.0, vec![0], vec![]),
            make_target("mid.c", 5.0, vec![0], vec![]),
        ];
        let names: Vec<String> = rank(targets).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["high.c", "mid.c", "low.c"]);
    }

    #[test]
    fn rank_breaks_score_ties_by_commit_count() {
        let targets = vec![
            make_target("few.c", 6.0, vec![0], vec![]),
            make_target("many.c", 6.0, vec![0, 1, 2], vec![]),
        ];
        let names: Vec<String> = rank(targets).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["many.c", "few.c"]);
    }

    #[test]
    fn shorten_matches_the_published_format() {
        let long = "a".repeat(41);
        let cut = shorten(&long, 40);
        assert_eq!(cut.len(), 40);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..37], &long[..37]);

        assert_eq!(shorten(&"a".repeat(40), 40), "a".repeat(40));
        assert_eq!(shorten("x", 2), "");
        assert_eq!(shorten("xyzzy", 3), "...");
    }

    #[test]
    fn render_header_uses_fixed_widths() {
        let commits = vec![make_commit("1234567890abcdef", "fix parser", "alice")];
        let ranked = vec![make_target("src/parser.c", 12.0, vec![0], vec![])];

        let out = render(&ranked, &commits, &ReportConfig::default());
        let header = out.lines().next().unwrap();
        assert!(header.starts_with("    12.0 src/parser.c"));
        assert!(header.ends_with("   1"));
        // score(8) + space + name(40) + space + count(4)
        assert_eq!(header.len(), 54);
    }

    #[test]
    fn singleton_reasons_hidden_without_detail() {
        let commits = vec![make_commit("1234567890abcdef", "fix parser", "alice")];
        let ranked = vec![make_target(
            "src/parser.c",
            12.0,
            vec![0],
            vec![("if (x)", 2), ("y = 1", 1)],
        )];

        let out = render(&ranked, &commits, &ReportConfig::default());
        assert!(out.contains("       2 if (x)\n"));
        assert!(!out.contains("y = 1"));
    }

    #[test]
    fn detail_mode_shows_singletons_and_commit_lines() {
        let commits = vec![
            make_commit("1234567890abcdef", "fix parser", "alice"),
            make_commit("fedcba0987654321", "revert fix", "bob"),
        ];
        let ranked = vec![make_target(
            "src/parser.c",
            12.0,
            vec![0, 1],
            vec![("y = 1", 1)],
        )];
        let report = ReportConfig {
            detail: true,
            ..ReportConfig::default()
        };

        let out = render(&ranked, &commits, &report);
        assert!(out.contains("       1 y = 1\n"));
        assert!(out.contains("         1234567 fix parser (alice)\n"));
        assert!(out.contains("         fedcba0 revert fix (bob)\n"));
    }

    #[test]
    fn top_k_limits_targets_and_reasons_but_not_totals() {
        let commits = vec![make_commit("1234567890abcdef", "m", "alice")];
        let ranked: Vec<Target> = (0..5)
            .map(|i| {
                make_target(
                    &format!("f{i}.c"),
                    (10 - i) as f64,
                    vec![0],
                    vec![("a = 1", 4), ("b = 2", 3), ("c = 3", 2), ("d = 4", 2)],
                )
            })
            .collect();
        let report = ReportConfig {
            top_targets: 2,
            top_reasons: 3,
            detail: false,
        };

        let out = render(&ranked, &commits, &report);
        assert!(out.contains("f0.c"));
        assert!(out.contains("f1.c"));
        assert!(!out.contains("f2.c"));
        assert!(out.contains("c = 3"));
        assert!(!out.contains("d = 4"));
        assert!(out.ends_with("total targets: 5, total commits: 1\n"));
    }

    #[test]
    fn blocks_end_with_a_blank_line() {
        let commits = vec![make_commit("1234567890abcdef", "m", "alice")];
        let ranked = vec![make_target("a.c", 3.0, vec![0], vec![])];

        let out = render(&ranked, &commits, &ReportConfig::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "total targets: 1, total commits: 1");
    }

    #[test]
    fn empty_run_still_prints_totals() {
        let out = render(&[], &[], &ReportConfig::default());
        assert_eq!(out, "total targets: 0, total commits: 0\n");
    }
}
