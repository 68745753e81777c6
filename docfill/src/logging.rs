//! Diagnostic output for docfill.
//!
//! Warnings about the KV file (skipped lines, duplicate keys, empty context)
//! are emitted as `warn!` events, so they show up on stderr at the default
//! level. `RUST_LOG=docfill=debug` adds per-part rendering detail.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format, colored only on a terminal.
///
/// # Example
/// ```bash
/// RUST_LOG=docfill=debug docfill -k data.txt -t letter.docx
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .compact(),
        )
        .init();
}
