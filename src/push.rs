//! Push reconciliation
//!
//! Decides which branches of each repository need pushing (local-only
//! by default, everything in `--all` mode) and pushes them one by one,
//! retrying once with `--set-upstream` when the remote has no tracking
//! ref for a branch.

use color_eyre::eyre::Result;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

use crate::branches::{self, DEFAULT_REMOTE};
use crate::prompt::Prompter;
use crate::runner::{CmdOutcome, GitRunner};
use crate::scan;

/// Behavior switches for the push tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushOptions {
    /// Push every local branch, not just the ones missing on the remote.
    pub push_all: bool,
    /// Append `--force` to every push.
    pub force: bool,
    /// Ask before touching a repository with uncommitted changes.
    pub check_changes: bool,
}

/// Per-repository outcome counts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PushSummary {
    pub pushed: usize,
    pub failed: usize,
}

/// Detects the push failure that means the branch has no upstream yet.
///
/// Matches exact English substrings of git's message, so this breaks
/// under a non-English locale and has to track git's wording. Kept in
/// one place so it is easy to replace.
fn needs_upstream(output: &str) -> bool {
    output.contains("has no upstream branch") || output.contains("set-upstream")
}

fn run_push(
    runner: &dyn GitRunner,
    repo: &Path,
    branch: &str,
    force: bool,
    set_upstream: bool,
) -> CmdOutcome {
    let mut args: Vec<&str> = vec!["push"];
    if set_upstream {
        args.extend(["--set-upstream", DEFAULT_REMOTE, branch]);
    } else {
        args.extend([DEFAULT_REMOTE, branch]);
    }
    if force {
        args.push("--force");
    }
    runner.run(repo, &args)
}

fn report_pushed(output: &str) {
    if output.contains("Everything up-to-date") {
        println!("      ✓ already up to date");
    } else if output.contains("new branch") {
        println!("      ✓ new branch pushed");
    } else {
        println!("      ✓ pushed");
    }
}

/// Push one branch, retrying exactly once with `--set-upstream` when
/// the failure text says the branch has no upstream.
fn push_branch(runner: &dyn GitRunner, repo: &Path, branch: &str, force: bool) -> bool {
    println!("    Pushing branch: {branch}");

    let first = run_push(runner, repo, branch, force, false);
    if first.success {
        report_pushed(&first.output);
        return true;
    }

    if needs_upstream(&first.output) {
        println!("      ⚠ no upstream branch, retrying with --set-upstream");
        let retry = run_push(runner, repo, branch, force, true);
        if retry.success {
            report_pushed(&retry.output);
            return true;
        }
        println!("      ✗ push failed: {}", retry.output);
        return false;
    }

    println!("      ✗ push failed: {}", first.output);
    false
}

/// Process one repository: decide which branches to push, push them,
/// and return to the branch that was checked out on entry.
pub fn push_repo(
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    repo: &Path,
    opts: PushOptions,
) -> PushSummary {
    let name = scan::repo_name(repo);
    println!();
    println!("{}", "=".repeat(80));
    println!("Repository: {name}");
    println!("{}", "=".repeat(80));

    let original_branch = branches::current_branch(runner, repo);
    println!("  Current branch: {original_branch}");

    let mut summary = PushSummary::default();

    if opts.check_changes && branches::has_uncommitted_changes(runner, repo) {
        println!("  ⚠ Uncommitted changes in working tree");
        if !prompter.confirm("  Push anyway? (y/n):") {
            println!("  Skipping this repository");
            return summary;
        }
    }

    println!("  Fetching remotes...");
    let fetch = runner.run(repo, &["fetch", "--all"]);
    if !fetch.success {
        warn!("fetch failed in {name}: {}", fetch.output);
        println!("  ⚠ Fetch failed, remote branch list may be stale");
    }

    let local = branches::local_branches(runner, repo);
    let remote = branches::remote_branches(runner, repo, DEFAULT_REMOTE);
    println!("  Branches: {} local, {} remote", local.len(), remote.len());

    if local.is_empty() {
        println!("  No local branches to push");
        return summary;
    }

    let to_push: BTreeSet<String> = if opts.push_all {
        println!("  Pushing all local branches");
        local
    } else {
        let local_only: BTreeSet<String> = local.difference(&remote).cloned().collect();
        if local_only.is_empty() {
            println!("  Every local branch already exists on the remote");
            if prompter.confirm("  Push updates to existing branches? (y/n):") {
                local
            } else {
                println!("  Nothing to push");
                return summary;
            }
        } else {
            println!("  {} local-only branch(es):", local_only.len());
            for branch in &local_only {
                println!("    - {branch}");
            }
            local_only
        }
    };

    for branch in &to_push {
        println!("  Checking out: {branch}");
        let checkout = runner.run(repo, &["checkout", branch]);
        if !checkout.success {
            println!("    ✗ checkout failed: {}", checkout.output);
            summary.failed += 1;
            continue;
        }

        if push_branch(runner, repo, branch, opts.force) {
            summary.pushed += 1;
        } else {
            summary.failed += 1;
        }
    }

    if !original_branch.is_empty() {
        println!("  Returning to branch: {original_branch}");
        let restore = runner.run(repo, &["checkout", &original_branch]);
        if !restore.success {
            warn!("could not return to {original_branch}: {}", restore.output);
        }
    }

    println!("  Pushed: {}, failed: {}", summary.pushed, summary.failed);
    summary
}

/// Scan `root` and push every discovered repository in turn.
pub fn run(
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    root: &Path,
    opts: PushOptions,
) -> Result<()> {
    println!("Scanning: {}", root.display());
    let repos = scan::find_repositories(root)?;
    for repo in &repos {
        println!("  ✓ {}", scan::repo_name(repo));
    }

    if repos.is_empty() {
        println!("No git checkouts found");
        return Ok(());
    }
    println!("Found {} git checkout(s)", repos.len());

    for repo in &repos {
        push_repo(runner, prompter, repo, opts);
    }

    println!();
    println!("All repositories processed");
    Ok(())
}
