//! Thrash detection.
//!
//! Replays a target's member commits against two working maps to find lines
//! that crossed from added to removed (or vice versa) in two *different*
//! commits. A line edited back and forth by distinct commits is indecisive
//! code, and the count of such events multiplies the target's churn score.
//! The maps are rebuilt per target and discarded after the replay.

use std::collections::HashMap;

use crate::git::PatchSource;
use crate::log::Commit;
use crate::targets::{Reason, Target};

/// Replay `target`'s member commits and attach ranked [`Reason`]s.
///
/// Maintains a `plus` map (currently added, last touched by commit X) and a
/// `minus` map (currently removed, last touched by commit X), keyed by exact
/// line text. An added line sitting in `minus` under a different commit id
/// is one thrash event; the `minus` entry is consumed and the line is
/// (re)recorded in `plus` under the current commit. Removed lines work
/// symmetrically against `plus`. The same line added and removed within one
/// commit never counts.
///
/// After the replay the target's score is multiplied by the total event
/// count, so a target with no thrash at all drops to zero and is excluded
/// from the final ranking. Commits whose patch cannot be fetched contribute
/// no lines but stay on the member list.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use churnscope_pulse::git::PatchSource;
/// use churnscope_pulse::log::Commit;
/// use churnscope_pulse::patch::CommitPatch;
/// use churnscope_pulse::targets::Target;
/// use churnscope_pulse::thrash::replay_target;
///
/// struct Canned(HashMap<String, CommitPatch>);
/// impl PatchSource for Canned {
///     fn patch_lines(&self, id: &str) -> churnscope_core::Result<CommitPatch> {
///         Ok(self.0.get(id).cloned().unwrap_or_default())
///     }
/// }
///
/// let commits = vec![
///     Commit { id: "c1".into(), ..Commit::default() },
///     Commit { id: "c2".into(), ..Commit::default() },
/// ];
/// let mut target = Target {
///     name: "a.c".into(),
///     score: 3.0,
///     commits: vec![0, 1],
///     reasons: vec![],
/// };
/// let patches = Canned(HashMap::from([
///     ("c1".into(), CommitPatch { added: vec![], removed: vec!["if (foo)".into()] }),
///     ("c2".into(), CommitPatch { added: vec!["if (foo)".into()], removed: vec![] }),
/// ]));
/// replay_target(&mut target, &commits, &patches);
/// assert_eq!(target.reasons[0].count, 1);
/// assert_eq!(target.score, 3.0);
/// ```
pub fn replay_target(target: &mut Target, commits: &[Commit], patches: &impl PatchSource) {
    // line text -> id of the commit that last added/removed it
    let mut plus: HashMap<String, String> = HashMap::new();
    let mut minus: HashMap<String, String> = HashMap::new();
    // per-line event counts, with first-event order kept for stable ties
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for &idx in &target.commits {
        let id = commits[idx].id.as_str();
        let Ok(patch) = patches.patch_lines(id) else {
            // unreadable patch: the commit stays a member but adds no lines
            continue;
        };
        for line in patch.added {
            if minus.get(&line).is_some_and(|touched| touched.as_str() != id) {
                bump(&mut counts, &mut first_seen, &line);
                minus.remove(&line);
            }
            plus.insert(line, id.to_string());
        }
        for line in patch.removed {
            if plus.get(&line).is_some_and(|touched| touched.as_str() != id) {
                bump(&mut counts, &mut first_seen, &line);
                plus.remove(&line);
            }
            minus.insert(line, id.to_string());
        }
    }

    let mut total: u32 = 0;
    let mut reasons = Vec::with_capacity(first_seen.len());
    for line in first_seen {
        let count = counts[&line];
        total += count;
        reasons.push(Reason { line, count });
    }
    reasons.sort_by(|a, b| b.count.cmp(&a.count));

    target.reasons = reasons;
    target.score *= f64::from(total);
}

fn bump(counts: &mut HashMap<String, u32>, first_seen: &mut Vec<String>, line: &str) {
    let entry = counts.entry(line.to_string()).or_insert(0);
    if *entry == 0 {
        first_seen.push(line.to_string());
    }
    *entry += 1;
}
