//! Branch inspection via the git CLI
//!
//! Branch sets are queried fresh right after the fetch that precedes
//! them; nothing here caches across state-mutating commands.

use std::collections::BTreeSet;
use std::path::Path;

use crate::runner::GitRunner;

/// The remote the tools synchronize against.
pub const DEFAULT_REMOTE: &str = "origin";

/// Short names of all local branches. Empty on query failure.
pub fn local_branches(runner: &dyn GitRunner, repo: &Path) -> BTreeSet<String> {
    let outcome = runner.run(repo, &["branch", "--format=%(refname:short)"]);
    if !outcome.success {
        return BTreeSet::new();
    }
    outcome
        .output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Short names of all branches on `remote`, with the `remote/` prefix
/// stripped. Lines carrying a `->` marker are a remote's default-branch
/// pointer, not a real branch, and are dropped; so are branches of any
/// other remote.
pub fn remote_branches(runner: &dyn GitRunner, repo: &Path, remote: &str) -> BTreeSet<String> {
    let outcome = runner.run(repo, &["branch", "-r", "--format=%(refname:short)"]);
    if !outcome.success {
        return BTreeSet::new();
    }
    let prefix = format!("{remote}/");
    outcome
        .output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .filter_map(|line| line.strip_prefix(&prefix))
        .map(String::from)
        .collect()
}

/// The currently checked-out branch, or an empty string when detached
/// or on failure.
pub fn current_branch(runner: &dyn GitRunner, repo: &Path) -> String {
    let outcome = runner.run(repo, &["branch", "--show-current"]);
    if outcome.success {
        outcome.output
    } else {
        String::new()
    }
}

/// Whether the working tree has uncommitted changes.
pub fn has_uncommitted_changes(runner: &dyn GitRunner, repo: &Path) -> bool {
    let outcome = runner.run(repo, &["status", "--porcelain"]);
    outcome.success && !outcome.output.trim().is_empty()
}
