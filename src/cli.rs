//! Startup plumbing shared by the two binaries

use color_eyre::eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging: warnings by default, everything under
/// `--debug`.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Make Ctrl-C abort the entire remaining batch, not just the current
/// repository, with a non-zero exit.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted by user");
        std::process::exit(1);
    })?;
    Ok(())
}
