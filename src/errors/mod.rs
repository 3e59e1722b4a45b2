//! # Error Handling
//!
//! Every operation in the crate reports failures through [`ConnectError`].
//! Nothing is retried and nothing is logged-and-swallowed: a failure aborts the
//! current call and is handed back to the caller.

use std::fmt;

/// Custom result type for Connect operations
pub type Result<T> = std::result::Result<T, ConnectError>;

/// What a title based lookup was searching for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Vault,
    Item,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Vault => write!(f, "vault"),
            LookupKind::Item => write!(f, "item"),
        }
    }
}

/// Main error type for the Connect client and the config loader
#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    /// The server answered with a non-success status
    #[error(
        "Unable to {operation}. Received {status} for {path} with message: {}",
        .message.as_deref().unwrap_or("<none>")
    )]
    Remote { operation: &'static str, status: u16, path: String, message: Option<String> },

    /// A title lookup matched zero or several records
    #[error("Found {count} {kind}s matching {query}")]
    AmbiguousLookup { kind: LookupKind, query: String, count: usize },

    /// No `opitem` was declared for a logical name
    #[error("There is no opitem specified for {logical_name}")]
    MissingItemTag { logical_name: String },

    /// No `opfield` was declared for a logical name
    #[error("There is no opfield specified for {logical_name}")]
    MissingFieldTag { logical_name: String },

    /// The `opfield` value is not of the form `section.field`
    #[error("Invalid field path format for {logical_name}: '{path}'")]
    InvalidFieldPath { logical_name: String, path: String },

    /// Neither the tag nor the load context names a vault
    #[error("There is no vault for {logical_name} field")]
    NoVaultForField { logical_name: String },

    /// The tag string could not be split into `key:value` tokens
    #[error("Malformed tag for {logical_name}: {reason}")]
    MalformedTag { logical_name: String, reason: String },

    /// The fetched item has no field matching the requested path
    #[error("There is no section {section} for field {field}")]
    UnknownSectionOrField { section: String, field: String },

    /// The config target has no slot with this name
    #[error("Config target has no field named {logical_name}")]
    UnknownTarget { logical_name: String },

    /// A response body did not have the expected shape
    #[error("Failed to deserialize {context}")]
    Deserialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced a response (connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid client or loader configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required environment variable is missing
    #[error("There is no value available in the {variable} variable")]
    EnvironmentNotSet { variable: &'static str },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConnectError {
    /// Create an error for a non-success response
    pub fn remote<P: Into<String>>(
        operation: &'static str,
        status: u16,
        path: P,
        message: Option<String>,
    ) -> Self {
        Self::Remote { operation, status, path: path.into(), message }
    }

    /// Create an error for a title lookup that did not match exactly once
    pub fn ambiguous<Q: Into<String>>(kind: LookupKind, query: Q, count: usize) -> Self {
        Self::AmbiguousLookup { kind, query: query.into(), count }
    }

    /// Create a deserialization error
    pub fn deserialization<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Deserialization { context: context.into(), source }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create an I/O error with context
    pub fn io<C: Into<String>>(context: C, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an error for a write to an undeclared config slot
    pub fn unknown_target<S: Into<String>>(logical_name: S) -> Self {
        Self::UnknownTarget { logical_name: logical_name.into() }
    }

    /// HTTP status of a remote failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised while parsing field declarations, before any request
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingItemTag { .. }
                | Self::MissingFieldTag { .. }
                | Self::InvalidFieldPath { .. }
                | Self::NoVaultForField { .. }
                | Self::MalformedTag { .. }
        )
    }
}

impl From<validator::ValidationErrors> for ConnectError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::config(errors.to_string())
    }
}
