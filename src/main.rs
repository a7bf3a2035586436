use anyhow::Result;
use clap::Parser;

use desklink::cli::{self, Cli};
use desklink::desktop::capture_session_environment;

/// Initialize the tracing subscriber for logging.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only log from this crate at info level unless RUST_LOG says otherwise
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("desklink=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    capture_session_environment();

    cli::run(cli)
}
