//! Logging and tracing utilities.
//!
//! The codecs only emit `tracing` events: a `debug` event when a discriminator
//! isn't recognised and the raw variant is kept, a `trace` event when an ID is
//! re-cased, and a `debug` event when configuration fails validation. A
//! provider binary installs a subscriber once with one of the functions here.
//! All logs are written to **stderr**, since stdout belongs to the plugin
//! protocol.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log levels (e.g., `info`, `azurerm_provider_sdk=debug`)
//!
//! # Examples
//!
//! ```bash
//! # Show unrecognised discriminators
//! RUST_LOG=azurerm_provider_sdk::polymorphic=debug ./terraform-provider-azurerm
//!
//! # Show every re-cased ID
//! RUST_LOG=azurerm_provider_sdk::resourceids=trace ./terraform-provider-azurerm
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(env_filter(default_level)).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Initialize the default logging subscriber.
///
/// Writes to stderr, filtered by `RUST_LOG`, defaulting to `info`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
///
/// # Example
///
/// ```ignore
/// use azurerm_provider_sdk::init_logging;
///
/// fn main() {
///     init_logging();
///     tracing::info!("Provider starting");
/// }
/// ```
pub fn init_logging() {
    init_logging_with_default(DEFAULT_LEVEL);
}

/// Initialize logging with a custom default level, used when `RUST_LOG` is
/// not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Unlike [`init_logging`], this function does not panic if a subscriber
/// has already been set, which makes it safe to call from tests.
pub fn try_init_logging() -> bool {
    subscriber(DEFAULT_LEVEL).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // second call is checked.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("azurerm_provider_sdk=debug").is_ok());
        assert!(EnvFilter::try_new("warn,azurerm_provider_sdk::polymorphic=debug").is_ok());
        assert!(EnvFilter::try_new("azurerm_provider_sdk::resourceids=trace").is_ok());
    }

    #[test]
    fn test_try_init_logging_is_idempotent() {
        try_init_logging();
        assert!(!try_init_logging());
    }
}
