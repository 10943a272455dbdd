//! Structured logging.
//!
//! `RUST_LOG` wins when set. Otherwise the configured level applies to this
//! crate and the CLI, and everything else stays at `warn`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for `log_level`.
pub fn default_directive(log_level: &str) -> String {
    format!(
        "warn,functions_client={lvl},functions_cli={lvl}",
        lvl = log_level
    )
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init(log_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
