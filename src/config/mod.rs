//! # Configuration Management
//!
//! Client settings ([`ClientConfig`]), the loader context ([`LoadContext`]) and
//! the environment variables both can be bootstrapped from.

pub mod secret;
pub mod settings;

pub use secret::SecretString;
pub use settings::{timeout_from_env, ClientConfig, LoadContext, DEFAULT_TIMEOUT_SECONDS};

/// Base URL of the Connect server
pub const ENV_CONNECT_HOST: &str = "OP_CONNECT_HOST";

/// Bearer token for the Connect server
pub const ENV_CONNECT_TOKEN: &str = "OP_CONNECT_TOKEN";

/// Request timeout in seconds
pub const ENV_CLIENT_TIMEOUT: &str = "OP_CONNECT_CLIENT_REQ_TIMEOUT";

/// Vault used by the config loader when a tag has no `opvault`
pub const ENV_VAULT: &str = "OP_VAULT";
