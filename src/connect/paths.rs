//! REST path construction for the `/v1` Connect resources.

use url::form_urlencoded;

const API_VERSION_PREFIX: &str = "/v1";

/// Builds request paths segment by segment.
///
/// ```rust,ignore
/// let path = PathBuilder::new().vault(vault_id).items().query("filter", "title eq \"x\"").build();
/// ```
#[derive(Debug, Clone)]
pub struct PathBuilder {
    path: String,
    has_query: bool,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { path: API_VERSION_PREFIX.to_string(), has_query: false }
    }

    pub fn vaults(mut self) -> Self {
        self.path.push_str("/vaults");
        self
    }

    pub fn vault(mut self, vault_id: &str) -> Self {
        self.path.push_str("/vaults/");
        self.path.push_str(vault_id);
        self
    }

    pub fn items(mut self) -> Self {
        self.path.push_str("/items");
        self
    }

    pub fn item(mut self, item_id: &str) -> Self {
        self.path.push_str("/items/");
        self.path.push_str(item_id);
        self
    }

    pub fn files(mut self) -> Self {
        self.path.push_str("/files");
        self
    }

    pub fn file(mut self, file_id: &str) -> Self {
        self.path.push_str("/files/");
        self.path.push_str(file_id);
        self
    }

    pub fn content(mut self) -> Self {
        self.path.push_str("/content");
        self
    }

    /// Append a form-url-encoded query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.path.push(if self.has_query { '&' } else { '?' });
        self.path.extend(form_urlencoded::byte_serialize(key.as_bytes()));
        self.path.push('=');
        self.path.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        self.has_query = true;
        self
    }

    pub fn build(self) -> String {
        self.path
    }
}

/// `name eq "<name>"` filter for vault lookups
pub fn vault_name_filter(name: &str) -> String {
    format!("name eq \"{}\"", name)
}

/// `title eq "<title>"` filter for item lookups
pub fn item_title_filter(title: &str) -> String {
    format!("title eq \"{}\"", title)
}
