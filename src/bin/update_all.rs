//! Update every branch of every git checkout under a directory.

use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;

use git_branch_sync::cli;
use git_branch_sync::prompt::StdinPrompter;
use git_branch_sync::runner::CliRunner;
use git_branch_sync::update::{self, UpdateOptions};

/// Update all branches of every git checkout under a directory
#[derive(Parser, Debug)]
#[command(name = "git-update-all")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Create tracking branches for all remote-only branches without asking
    #[arg(short, long)]
    auto_track: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    cli::init_logging(args.debug);
    cli::install_interrupt_handler()?;

    let runner = CliRunner::new();
    let opts = UpdateOptions {
        auto_track: args.auto_track,
    };
    update::run(&runner, &StdinPrompter, &args.path, opts)
}
