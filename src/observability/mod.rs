//! # Observability
//!
//! Structured logging for the client, the loader and the CLI. Secret values
//! are never recorded; spans carry vault and item references only.

pub mod logging;

pub use logging::init_logging;
