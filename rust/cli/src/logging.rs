//! Log output for the `holdem` binary.
//!
//! Engine events go to stderr so stdout stays clean for summaries and JSON.
//! `RUST_LOG` selects what is shown; the default only lets warnings through.

/// Installs the global `fmt` subscriber. Later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
