//! # Structured Logging
//!
//! Span macros and subscriber setup for the tracing ecosystem. Every HTTP call
//! made by the Connect client runs inside a [`request_span!`] carrying a fresh
//! `request_id`, so the debug lines of one call can be picked out of a busy log.

use tracing_subscriber::{fmt, EnvFilter};

/// Create a tracing span for one Connect request.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/v1/vaults", operation = "retrieve vaults");
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        $crate::__private::tracing::debug_span!(
            "connect_request",
            method = %$method,
            path = %$path,
            request_id = %$crate::__private::uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        $crate::__private::tracing::debug_span!(
            "connect_request",
            method = %$method,
            path = %$path,
            request_id = %$crate::__private::uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for one item resolution during a config load
#[macro_export]
macro_rules! load_span {
    ($vault:expr, $item:expr) => {
        $crate::__private::tracing::debug_span!(
            "load_item",
            vault = %$vault,
            item = %$item,
            operation_id = %$crate::__private::uuid::Uuid::new_v4()
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` with `verbose` and `warn`
/// without it. Returns false when a subscriber was already installed
/// (integration tests, embedding applications).
pub fn init_logging(verbose: bool, json: bool) -> bool {
    let default_level = if verbose { "opconnect=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(verbose);

    let result = if json { builder.json().try_init() } else { builder.try_init() };
    result.is_ok()
}
