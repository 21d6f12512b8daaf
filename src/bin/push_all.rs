//! Push every local branch of every git checkout under a directory.

use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;

use git_branch_sync::cli;
use git_branch_sync::prompt::{Prompter, StdinPrompter};
use git_branch_sync::push::{self, PushOptions};
use git_branch_sync::runner::CliRunner;

/// Push all local branches of every git checkout under a directory
#[derive(Parser, Debug)]
#[command(name = "git-push-all")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Push all branches, not just the ones missing on the remote
    #[arg(short, long)]
    all: bool,

    /// Force-push (may overwrite changes on the remote)
    #[arg(short, long)]
    force: bool,

    /// Skip the uncommitted-changes check
    #[arg(long)]
    no_check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    cli::init_logging(args.debug);
    cli::install_interrupt_handler()?;

    if args.force {
        println!("⚠ Force push may overwrite changes on the remote!");
        if !StdinPrompter.confirm("Continue? (y/n):") {
            println!("Cancelled");
            std::process::exit(1);
        }
    }

    let runner = CliRunner::new();
    let opts = PushOptions {
        push_all: args.all,
        force: args.force,
        check_changes: !args.no_check,
    };
    push::run(&runner, &StdinPrompter, &args.path, opts)
}
