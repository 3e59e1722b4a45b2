//! HTTP client for a Connect server
//!
//! Authenticated reqwest client implementing [`ConnectApi`] plus the file
//! attachment endpoints.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, Instrument};

use super::api::ConnectApi;
use super::paths::PathBuilder;
use crate::config::ClientConfig;
use crate::domain::{ErrorBody, File, Item, ItemSummary, ItemVault, Vault};
use crate::errors::{ConnectError, Result};
use crate::request_span;

/// File name used by [`Client::download_file`] when the server gives none
pub const DEFAULT_DOWNLOAD_NAME: &str = "1password_item_file.txt";

/// Authenticated HTTP client for the Connect API.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("opconnect/", env!("CARGO_PKG_VERSION")));

        if let Some(ca_file) = &config.ca_file {
            let pem = std::fs::read(ca_file).map_err(|e| {
                ConnectError::io(format!("Failed to read CA file {}", ca_file.display()), e)
            })?;
            let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                ConnectError::config(format!("Invalid CA file {}: {}", ca_file.display(), e))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        let http = builder
            .build()
            .map_err(|e| ConnectError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a client from `OP_CONNECT_HOST`, `OP_CONNECT_TOKEN` and
    /// `OP_CONNECT_CLIENT_REQ_TIMEOUT`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List the files attached to an item
    pub async fn get_files(&self, item_id: &str, vault_id: &str) -> Result<Vec<File>> {
        let path = PathBuilder::new().vault(vault_id).item(item_id).files().build();
        self.send_json(Method::GET, "retrieve files", &path, None).await
    }

    /// Fetch the metadata of one attached file
    pub async fn get_file(&self, file_id: &str, item_id: &str, vault_id: &str) -> Result<File> {
        let path = PathBuilder::new().vault(vault_id).item(item_id).file(file_id).build();
        self.send_json(Method::GET, "retrieve file", &path, None).await
    }

    /// Fetch the raw content of an attached file.
    ///
    /// A `content_path` taken from [`File::content_path`] is requested as-is;
    /// without one the path is derived from the ids.
    pub async fn get_file_content(
        &self,
        file_id: &str,
        item_id: &str,
        vault_id: &str,
        content_path: Option<&str>,
    ) -> Result<Vec<u8>> {
        let path = match content_path {
            Some(path) => path.to_string(),
            None => PathBuilder::new().vault(vault_id).item(item_id).file(file_id).content().build(),
        };
        let operation = "retrieve file content";

        async {
            let response = self.send(Method::GET, &path, None).await?;
            let response = check_status(operation, &path, response).await?;
            let bytes = response.bytes().await?;
            debug!(size = bytes.len(), "Received file content");
            Ok::<_, ConnectError>(bytes.to_vec())
        }
        .instrument(request_span!("GET", path, operation = operation))
        .await
    }

    /// Download an attached file into `dir` and return the written path.
    ///
    /// Only the final component of the server-provided name is used.
    pub async fn download_file(
        &self,
        file_id: &str,
        item_id: &str,
        vault_id: &str,
        dir: &Path,
    ) -> Result<PathBuf> {
        let file = self.get_file(file_id, item_id, vault_id).await?;
        let content = self
            .get_file_content(file_id, item_id, vault_id, file.content_path.as_deref())
            .await?;

        let target = dir.join(download_name(&file));
        tokio::fs::write(&target, &content)
            .await
            .map_err(|e| ConnectError::io(format!("Failed to write {}", target.display()), e))?;

        debug!(path = %target.display(), size = content.len(), "Downloaded file");
        Ok(target)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Item>) -> Result<Response> {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!("{} {}", method, url);

        let mut request =
            self.http.request(method, &url).bearer_auth(self.config.token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Send a request and deserialize the JSON response
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        operation: &'static str,
        path: &str,
        body: Option<&Item>,
    ) -> Result<T> {
        let span = request_span!(method, path, operation = operation);
        async {
            let response = self.send(method.clone(), path, body).await?;
            handle_response(operation, path, response).await
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl ConnectApi for Client {
    async fn get_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>> {
        let mut builder = PathBuilder::new().vaults();
        if let Some(filter) = filter {
            builder = builder.query("filter", filter);
        }
        self.send_json(Method::GET, "retrieve vaults", &builder.build(), None).await
    }

    async fn get_vault_by_id(&self, vault_id: &str) -> Result<Vault> {
        let path = PathBuilder::new().vault(vault_id).build();
        self.send_json(Method::GET, "retrieve vault", &path, None).await
    }

    async fn get_items(&self, vault_id: &str, filter: Option<&str>) -> Result<Vec<ItemSummary>> {
        let mut builder = PathBuilder::new().vault(vault_id).items();
        if let Some(filter) = filter {
            builder = builder.query("filter", filter);
        }
        self.send_json(Method::GET, "retrieve items", &builder.build(), None).await
    }

    async fn get_item_by_id(&self, item_id: &str, vault_id: &str) -> Result<Item> {
        let path = PathBuilder::new().vault(vault_id).item(item_id).build();
        self.send_json(Method::GET, "retrieve item", &path, None).await
    }

    async fn create_item(&self, vault_id: &str, item: &Item) -> Result<Item> {
        let path = PathBuilder::new().vault(vault_id).items().build();
        self.send_json(Method::POST, "create item", &path, Some(item)).await
    }

    async fn update_item(&self, item_id: &str, vault_id: &str, mut item: Item) -> Result<Item> {
        item.id = Some(item_id.to_string());
        item.vault = Some(ItemVault::new(vault_id));

        let path = PathBuilder::new().vault(vault_id).item(item_id).build();
        self.send_json(Method::PUT, "update item", &path, Some(&item)).await
    }

    async fn delete_item(&self, item_id: &str, vault_id: &str) -> Result<()> {
        let path = PathBuilder::new().vault(vault_id).item(item_id).build();
        let operation = "delete item";

        async {
            let response = self.send(Method::DELETE, &path, None).await?;
            check_status(operation, &path, response).await?;
            Ok::<_, ConnectError>(())
        }
        .instrument(request_span!("DELETE", path, operation = operation))
        .await
    }
}

/// Turn a non-success response into [`ConnectError::Remote`]
async fn check_status(operation: &'static str, path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    trace!("Error response:\n{}", error_text);

    let message = serde_json::from_str::<ErrorBody>(&error_text).ok().and_then(|b| b.message);
    Err(ConnectError::remote(operation, status.as_u16(), path, message))
}

/// Check the status and deserialize the JSON body
async fn handle_response<T: DeserializeOwned>(
    operation: &'static str,
    path: &str,
    response: Response,
) -> Result<T> {
    let response = check_status(operation, path, response).await?;
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        ConnectError::deserialization(format!("{} response from {}", operation, path), e)
    })
}

fn download_name(file: &File) -> String {
    file.name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DOWNLOAD_NAME)
        .to_string()
}
