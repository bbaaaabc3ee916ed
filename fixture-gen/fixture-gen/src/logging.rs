use std::io;
use std::io::IsTerminal as _;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Structured logs go to stderr, filtered by `RUST_LOG` (defaults to `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();
}
