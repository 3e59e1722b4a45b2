//! # Connect Client
//!
//! Access to the vaults, items and files of a Connect server, in async
//! ([`Client`]) and blocking ([`BlockingClient`]) form. Lookups by id or title
//! are shared through [`ConnectApi`].

pub mod api;
pub mod blocking;
pub mod client;
pub mod paths;

pub use api::ConnectApi;
pub use blocking::BlockingClient;
pub use client::{Client, DEFAULT_DOWNLOAD_NAME};
pub use paths::PathBuilder;
