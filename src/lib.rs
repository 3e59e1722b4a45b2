//! # opconnect
//!
//! Client library for a 1Password Connect server, plus a declarative loader
//! that fills application config from item fields.
//!
//! ## Architecture
//!
//! ```text
//! tags / FieldSpec → ResolutionPlan → ConnectApi::get_item → locate → ValueSink
//!                                          ↓
//!                                  Client (reqwest) / BlockingClient
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use opconnect::{loader, Client, ConnectApi, FieldSpec, LoadContext, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::from_env()?;
//!     let vault = client.get_vault("Shared").await?;
//!     println!("{} holds {:?} items", vault.name, vault.items);
//!
//!     let values = loader::load_dict(
//!         &client,
//!         &LoadContext::from_env(),
//!         [("db_password", FieldSpec::new("Database", "credentials.password"))],
//!     )
//!     .await?;
//!     assert!(values.contains_key("db_password"));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connect;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod observability;

// Re-export commonly used types and traits
pub use config::{ClientConfig, LoadContext, SecretString};
pub use connect::{BlockingClient, Client, ConnectApi};
pub use domain::{is_id, Field, File, Item, ItemSummary, Section, Vault};
pub use errors::{ConnectError, Result};
pub use loader::{FieldSpec, FieldTag, TaggedConfig, ValueSink};

// Paths used by the exported span macros, so callers need neither crate
#[doc(hidden)]
pub mod __private {
    pub use tracing;
    pub use uuid;
}

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
