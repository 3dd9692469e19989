//! Raw git log parsing.
//!
//! Turns the combined `git log --format=raw --numstat` text stream into an
//! ordered sequence of [`Commit`] records, one forward pass, line by line.
//! Malformed lines are skipped rather than treated as fatal: real log
//! streams interleave binary-file stat lines (`-\t-\tpath`) and other noise.

/// Commit author, taken from the `author` header line.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::log::Author;
///
/// let author = Author {
///     name: "alice".into(),
///     email: "alice@example.com".into(),
///     timestamp: 1700000000,
/// };
/// assert_eq!(author.name, "alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Author name; may contain spaces.
    pub name: String,
    /// Author email, without the angle brackets.
    pub email: String,
    /// Unix timestamp in seconds. The timezone offset is ignored.
    pub timestamp: i64,
}

/// Numeric diff stats for one file within one commit.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::log::FileStat;
///
/// let stat = FileStat {
///     path: "src/main.c".into(),
///     added: 12,
///     deleted: 3,
/// };
/// assert_eq!(stat.added + stat.deleted, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// File path relative to the repository root.
    pub path: String,
    /// Lines added in this commit.
    pub added: u32,
    /// Lines deleted in this commit.
    pub deleted: u32,
}

/// One commit parsed from the raw log stream.
///
/// Immutable once parsed; commits keep the log's native order
/// (newest first).
///
/// # Examples
///
/// ```
/// use churnscope_pulse::log::{Author, Commit};
///
/// let commit = Commit {
///     id: "abc123".into(),
///     tree: "def456".into(),
///     parent: String::new(),
///     author: Author::default(),
///     message: vec!["initial import".into()],
///     files: vec![],
/// };
/// assert!(commit.parent.is_empty(), "root commits have no parent");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Commit {
    /// Full commit hash.
    pub id: String,
    /// Tree hash.
    pub tree: String,
    /// First parent hash; empty for root commits.
    pub parent: String,
    /// Author header fields.
    pub author: Author,
    /// Message body lines, in order, without the 4-space indent.
    pub message: Vec<String>,
    /// Per-file numstat entries.
    pub files: Vec<FileStat>,
}

/// Parse the combined `--format=raw --numstat` log text into commits.
///
/// Each `commit <hash>` line starts a new record; every other recognized
/// line attaches to the most recent one. Header lines arriving before any
/// commit line, unparsable author timestamps, and non-numeric stat fields
/// are all skipped silently.
///
/// # Examples
///
/// ```
/// use churnscope_pulse::log::parse_raw_log;
///
/// let raw = "commit aaa\ntree bbb\nauthor alice <a@example.com> 1700000000 +0900\n\n    fix the thing\n\n3\t1\tsrc/main.c\n";
/// let commits = parse_raw_log(raw);
/// assert_eq!(commits.len(), 1);
/// assert_eq!(commits[0].files[0].added, 3);
/// ```
pub fn parse_raw_log(raw: &str) -> Vec<Commit> {
    let mut commits: Vec<Commit> = Vec::new();

    for line in raw.lines() {
        if let Some(id) = line.strip_prefix("commit ") {
            commits.push(Commit {
                id: id.to_string(),
                ..Commit::default()
            });
            continue;
        }
        let Some(current) = commits.last_mut() else {
            continue;
        };
        if let Some(tree) = line.strip_prefix("tree ") {
            current.tree = tree.to_string();
        } else if let Some(parent) = line.strip_prefix("parent ") {
            current.parent = parent.to_string();
        } else if let Some(rest) = line.strip_prefix("author ") {
            if let Some(author) = parse_author(rest) {
                current.author = author;
            }
        } else if let Some(msg) = line.strip_prefix("    ") {
            if !msg.is_empty() {
                current.message.push(msg.to_string());
            }
        } else if let Some(stat) = parse_numstat(line) {
            current.files.push(stat);
        }
    }

    commits
}

/// Scan `NAME <EMAIL> <unix-ts> <tz-offset>` into an [`Author`].
///
/// Returns `None` when the brackets are missing or the timestamp does not
/// parse; the caller skips the line in that case.
fn parse_author(rest: &str) -> Option<Author> {
    let open = rest.find('<')?;
    let close = rest[open..].find('>')? + open;
    let name = rest[..open].trim().to_string();
    let email = rest[open + 1..close].to_string();
    let timestamp = rest[close + 1..]
        .split_whitespace()
        .next()?
        .parse::<i64>()
        .ok()?;
    Some(Author {
        name,
        email,
        timestamp,
    })
}

/// Scan a `<added>\t<deleted>\t<path>` numstat line.
///
/// Binary-file lines (`-\t-\tpath`) fail the numeric parse and return
/// `None`, as do lines with fewer than three fields.
fn parse_numstat(line: &str) -> Option<FileStat> {
    let mut fields = line.splitn(3, '\t');
    let added = fields.next()?.parse::<u32>().ok()?;
    let deleted = fields.next()?.parse::<u32>().ok()?;
    let path = fields.next()?;
    if path.is_empty() {
        return None;
    }
    Some(FileStat {
        path: path.to_string(),
        added,
        deleted,
    })
}
