//! Update reconciliation
//!
//! Pulls every local branch of each repository and offers to create
//! local tracking branches for branches that only exist on the remote.

use color_eyre::eyre::Result;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

use crate::branches::{self, DEFAULT_REMOTE};
use crate::prompt::{Prompter, TrackChoice};
use crate::runner::GitRunner;
use crate::scan;

/// Behavior switches for the update tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Create tracking branches for every remote-only branch without asking.
    pub auto_track: bool,
}

/// Check out one branch and pull it. Pull failures are warnings; the
/// caller moves on to the next branch.
fn update_branch(runner: &dyn GitRunner, repo: &Path, branch: &str) -> bool {
    println!("    Checking out: {branch}");
    let checkout = runner.run(repo, &["checkout", branch]);
    if !checkout.success {
        println!("      ✗ checkout failed: {}", checkout.output);
        return false;
    }

    let pull = runner.run(repo, &["pull"]);
    if pull.success {
        if pull.output.contains("Already up to date") || pull.output.contains("Already up-to-date")
        {
            println!("      ✓ already up to date");
        } else {
            println!("      ✓ updated");
        }
        true
    } else {
        warn!("pull failed for {branch}: {}", pull.output);
        println!("      ⚠ pull failed: {}", pull.output);
        false
    }
}

/// Create a local branch tracking its remote counterpart.
fn create_tracking_branch(runner: &dyn GitRunner, repo: &Path, branch: &str) -> bool {
    println!("    Creating tracking branch: {branch}");
    let remote_ref = format!("{DEFAULT_REMOTE}/{branch}");
    let outcome = runner.run(repo, &["checkout", "-b", branch, &remote_ref]);
    if outcome.success {
        println!("      ✓ created");
        true
    } else {
        println!("      ✗ creation failed: {}", outcome.output);
        false
    }
}

/// Update one repository: fetch, pull every local branch, then handle
/// remote-only branches and return to the branch checked out on entry.
pub fn update_repo(
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    repo: &Path,
    opts: UpdateOptions,
) {
    let name = scan::repo_name(repo);
    println!();
    println!("{}", "=".repeat(80));
    println!("Repository: {name}");
    println!("{}", "=".repeat(80));

    let original_branch = branches::current_branch(runner, repo);
    println!("  Current branch: {original_branch}");

    // Unlike the push path, a failed fetch here means pulls would merge
    // against stale tracking refs, so the whole repository is skipped.
    println!("  Fetching remotes (with prune)...");
    let fetch = runner.run(repo, &["fetch", "--all", "--prune"]);
    if !fetch.success {
        warn!("fetch failed in {name}: {}", fetch.output);
        println!("  ✗ Fetch failed: {}", fetch.output);
        return;
    }

    let local = branches::local_branches(runner, repo);
    let remote = branches::remote_branches(runner, repo, DEFAULT_REMOTE);
    println!("  Branches: {} local, {} remote", local.len(), remote.len());

    if !local.is_empty() {
        println!("  Updating local branches...");
        for branch in &local {
            update_branch(runner, repo, branch);
        }
    }

    let remote_only: BTreeSet<String> = remote.difference(&local).cloned().collect();
    if !remote_only.is_empty() {
        println!("  {} remote-only branch(es):", remote_only.len());
        for branch in &remote_only {
            println!("    - {branch}");
        }

        if opts.auto_track {
            println!("  Creating tracking branches...");
            for branch in &remote_only {
                create_tracking_branch(runner, repo, branch);
            }
        } else {
            match prompter.choose_tracking("  Create these tracking branches? (y/n/all):") {
                TrackChoice::All => {
                    for branch in &remote_only {
                        create_tracking_branch(runner, repo, branch);
                    }
                }
                TrackChoice::AskEach => {
                    for branch in &remote_only {
                        if prompter.confirm(&format!("    Create {branch}? (y/n):")) {
                            create_tracking_branch(runner, repo, branch);
                        }
                    }
                }
                TrackChoice::None => {}
            }
        }
    }

    if !original_branch.is_empty() {
        println!("  Returning to branch: {original_branch}");
        let restore = runner.run(repo, &["checkout", &original_branch]);
        if !restore.success {
            warn!("could not return to {original_branch}: {}", restore.output);
        }
    }

    println!("  Repository updated");
}

/// Scan `root` and update every discovered repository in turn.
pub fn run(
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    root: &Path,
    opts: UpdateOptions,
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
        update_repo(runner, prompter, repo, opts);
    }

    println!();
    println!("All repositories processed");
    Ok(())
}
