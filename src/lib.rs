//! Batch synchronization of git checkouts against their remotes
//!
//! Two binaries share this library: `git-push-all` pushes the local
//! branches of every checkout found under a root directory, and
//! `git-update-all` pulls every branch and offers to create tracking
//! branches for branches that only exist on the remote. All git state is
//! reached through the `git` executable; the tools persist nothing of
//! their own.

pub mod branches;
pub mod cli;
pub mod prompt;
pub mod push;
pub mod runner;
pub mod scan;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;
