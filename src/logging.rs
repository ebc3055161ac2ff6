//! Tracing setup for binaries and tests that embed the engine

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVE: &str = "ledger_core=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber once per process.
///
/// `RUST_LOG`, when set, replaces the default filter entirely. Does nothing
/// if another subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .try_init()
            .is_ok()
        {
            tracing::info!("ledger-core tracing initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_is_a_valid_filter() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }

    #[test]
    fn init_is_repeatable() {
        init_tracing();
        init_tracing();
    }
}
