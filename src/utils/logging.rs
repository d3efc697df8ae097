//! Diagnostic logging setup.
//!
//! Stdout carries the conversation, so diagnostics always go to stderr.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is on. Calling this twice is harmless.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("warn,medibot=debug")
    } else {
        EnvFilter::new("warn")
    }
}
