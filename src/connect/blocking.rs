//! Blocking mode
//!
//! [`BlockingClient`] drives the async [`Client`] on its own current-thread
//! runtime. It must not be used from inside an async runtime; calling it there
//! panics in `block_on`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::runtime::{Builder, Runtime};

use super::api::ConnectApi;
use super::client::Client;
use crate::config::{ClientConfig, LoadContext};
use crate::domain::{File, Item, ItemSummary, Vault};
use crate::errors::{ConnectError, Result};
use crate::loader::{self, FieldSpec, TaggedConfig};

/// Synchronous wrapper around [`Client`]
#[derive(Debug)]
pub struct BlockingClient {
    inner: Client,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_client(Client::new(config)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_client(Client::from_env()?)
    }

    /// Wrap an existing async client
    pub fn from_client(inner: Client) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConnectError::io("Failed to start blocking runtime", e))?;
        Ok(Self { inner, runtime })
    }

    /// The async client driven by this wrapper
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Run any future on the wrapper's runtime
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn get_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>> {
        self.block_on(self.inner.get_vaults(filter))
    }

    pub fn get_vault(&self, vault: &str) -> Result<Vault> {
        self.block_on(self.inner.get_vault(vault))
    }

    pub fn get_vault_by_id(&self, vault_id: &str) -> Result<Vault> {
        self.block_on(self.inner.get_vault_by_id(vault_id))
    }

    pub fn get_vault_by_title(&self, name: &str) -> Result<Vault> {
        self.block_on(self.inner.get_vault_by_title(name))
    }

    pub fn get_items(&self, vault_id: &str, filter: Option<&str>) -> Result<Vec<ItemSummary>> {
        self.block_on(self.inner.get_items(vault_id, filter))
    }

    pub fn get_item(&self, item: &str, vault: &str) -> Result<Item> {
        self.block_on(self.inner.get_item(item, vault))
    }

    pub fn get_item_by_id(&self, item_id: &str, vault_id: &str) -> Result<Item> {
        self.block_on(self.inner.get_item_by_id(item_id, vault_id))
    }

    pub fn get_item_by_title(&self, title: &str, vault_id: &str) -> Result<Item> {
        self.block_on(self.inner.get_item_by_title(title, vault_id))
    }

    pub fn create_item(&self, vault_id: &str, item: &Item) -> Result<Item> {
        self.block_on(self.inner.create_item(vault_id, item))
    }

    pub fn update_item(&self, item_id: &str, vault_id: &str, item: Item) -> Result<Item> {
        self.block_on(self.inner.update_item(item_id, vault_id, item))
    }

    pub fn delete_item(&self, item_id: &str, vault_id: &str) -> Result<()> {
        self.block_on(self.inner.delete_item(item_id, vault_id))
    }

    pub fn get_files(&self, item_id: &str, vault_id: &str) -> Result<Vec<File>> {
        self.block_on(self.inner.get_files(item_id, vault_id))
    }

    pub fn get_file(&self, file_id: &str, item_id: &str, vault_id: &str) -> Result<File> {
        self.block_on(self.inner.get_file(file_id, item_id, vault_id))
    }

    pub fn get_file_content(
        &self,
        file_id: &str,
        item_id: &str,
        vault_id: &str,
        content_path: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.block_on(self.inner.get_file_content(file_id, item_id, vault_id, content_path))
    }

    pub fn download_file(
        &self,
        file_id: &str,
        item_id: &str,
        vault_id: &str,
        dir: &Path,
    ) -> Result<PathBuf> {
        self.block_on(self.inner.download_file(file_id, item_id, vault_id, dir))
    }
}

/// Blocking form of [`loader::load_dict`]
pub fn load_dict<I, N>(
    client: &BlockingClient,
    ctx: &LoadContext,
    config: I,
) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = (N, FieldSpec)>,
    N: Into<String>,
{
    client.block_on(loader::load_dict(client.inner(), ctx, config))
}

/// Blocking form of [`loader::load`]
pub fn load<T: TaggedConfig>(client: &BlockingClient, ctx: &LoadContext, target: &mut T) -> Result<()> {
    client.block_on(loader::load(client.inner(), ctx, target))
}
