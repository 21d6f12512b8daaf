//! Discovery of git checkouts under a root directory

use color_eyre::eyre::{Context, Result, eyre};
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the immediate subdirectories of `root` that are git checkouts.
///
/// A directory qualifies when it contains a `.git` entry (a directory,
/// or the gitfile a worktree or submodule checkout carries). Plain files
/// and metadata-less directories are skipped; nothing is recursed into.
pub fn find_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(eyre!("Path does not exist: {}", root.display()));
    }
    if !root.is_dir() {
        return Err(eyre!("Path is not a directory: {}", root.display()));
    }

    let mut repos = Vec::new();
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read directory: {}", root.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() && path.join(".git").exists() {
            debug!("Found git checkout: {}", path.display());
            repos.push(path);
        }
    }

    Ok(repos)
}

/// Directory name of a repository path, for console reporting.
pub fn repo_name(repo: &Path) -> String {
    repo.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo.display().to_string())
}
