//! Core Connect client trait.

use async_trait::async_trait;
use tracing::debug;

use super::paths::{item_title_filter, vault_name_filter};
use crate::domain::{Item, ItemSummary, Reference, Vault};
use crate::errors::{ConnectError, LookupKind, Result};

/// Vault and item operations of a Connect server.
///
/// Implementors provide the resource level calls; lookups by id-or-title are
/// provided on top of them, so an HTTP client and an in-memory test double
/// share the same resolution rules.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log field values
/// - Errors MUST NOT carry field values
///
/// # Example Implementation
///
/// ```rust,ignore
/// use opconnect::connect::ConnectApi;
/// use async_trait::async_trait;
///
/// struct Fixture { item: Item }
///
/// #[async_trait]
/// impl ConnectApi for Fixture {
///     async fn get_item_by_id(&self, _item_id: &str, _vault_id: &str) -> Result<Item> {
///         Ok(self.item.clone())
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait ConnectApi: Send + Sync {
    /// List vaults, optionally narrowed by a server side filter expression.
    async fn get_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>>;

    /// Fetch one vault by id.
    async fn get_vault_by_id(&self, vault_id: &str) -> Result<Vault>;

    /// List the item summaries of a vault, optionally filtered.
    async fn get_items(&self, vault_id: &str, filter: Option<&str>) -> Result<Vec<ItemSummary>>;

    /// Fetch the full item, with its sections and fields.
    async fn get_item_by_id(&self, item_id: &str, vault_id: &str) -> Result<Item>;

    /// Create a new item in a vault and return the stored version.
    async fn create_item(&self, vault_id: &str, item: &Item) -> Result<Item>;

    /// Replace an item.
    ///
    /// The body's `id` and `vault.id` are overwritten with `item_id` and
    /// `vault_id` before sending.
    async fn update_item(&self, item_id: &str, vault_id: &str, item: Item) -> Result<Item>;

    async fn delete_item(&self, item_id: &str, vault_id: &str) -> Result<()>;

    /// Fetch a vault by id or by name.
    async fn get_vault(&self, vault: &str) -> Result<Vault> {
        match Reference::classify(vault) {
            Reference::Id(id) => self.get_vault_by_id(id).await,
            Reference::Title(name) => self.get_vault_by_title(name).await,
        }
    }

    /// Fetch the one vault whose name is `name`.
    ///
    /// # Errors
    ///
    /// [`ConnectError::AmbiguousLookup`] unless exactly one vault matches.
    async fn get_vault_by_title(&self, name: &str) -> Result<Vault> {
        let filter = vault_name_filter(name);
        let mut vaults = self.get_vaults(Some(&filter)).await?;

        if vaults.len() != 1 {
            return Err(ConnectError::ambiguous(LookupKind::Vault, filter, vaults.len()));
        }
        Ok(vaults.remove(0))
    }

    /// Fetch the one item titled `title` in the given vault.
    ///
    /// The list endpoint returns summaries only, so the match is fetched again
    /// by id to obtain its sections and fields.
    async fn get_item_by_title(&self, title: &str, vault_id: &str) -> Result<Item> {
        let filter = item_title_filter(title);
        let items = self.get_items(vault_id, Some(&filter)).await?;

        match items.as_slice() {
            [summary] => self.get_item_by_id(&summary.id, vault_id).await,
            _ => Err(ConnectError::ambiguous(LookupKind::Item, filter, items.len())),
        }
    }

    /// Fetch an item by id or title from a vault given by id or name.
    async fn get_item(&self, item: &str, vault: &str) -> Result<Item> {
        let vault_id = match Reference::classify(vault) {
            Reference::Id(id) => id.to_string(),
            Reference::Title(name) => {
                debug!(vault = %name, "Resolving vault by name");
                self.get_vault_by_title(name).await?.id
            }
        };

        match Reference::classify(item) {
            Reference::Id(id) => self.get_item_by_id(id, &vault_id).await,
            Reference::Title(title) => self.get_item_by_title(title, &vault_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const VAULT_ID: &str = "hfnjvi6aymbsnfc2xeeoheizda";
    const ITEM_ID: &str = "wepiqdxdzncjtnvmv5fegud4qy";

    /// Records every call so tests can assert on dispatch
    #[derive(Default)]
    struct Recorder {
        vaults: Vec<Vault>,
        summaries: Vec<ItemSummary>,
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConnectApi for Recorder {
        async fn get_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>> {
            self.record(format!("get_vaults {}", filter.unwrap_or("")));
            Ok(self.vaults.clone())
        }

        async fn get_vault_by_id(&self, vault_id: &str) -> Result<Vault> {
            self.record(format!("get_vault_by_id {}", vault_id));
            Ok(Vault { id: vault_id.to_string(), ..Default::default() })
        }

        async fn get_items(&self, vault_id: &str, filter: Option<&str>) -> Result<Vec<ItemSummary>> {
            self.record(format!("get_items {} {}", vault_id, filter.unwrap_or("")));
            Ok(self.summaries.clone())
        }

        async fn get_item_by_id(&self, item_id: &str, vault_id: &str) -> Result<Item> {
            self.record(format!("get_item_by_id {} {}", item_id, vault_id));
            Ok(Item { id: Some(item_id.to_string()), ..Default::default() })
        }

        async fn create_item(&self, _vault_id: &str, item: &Item) -> Result<Item> {
            Ok(item.clone())
        }

        async fn update_item(&self, _item_id: &str, _vault_id: &str, item: Item) -> Result<Item> {
            Ok(item)
        }

        async fn delete_item(&self, _item_id: &str, _vault_id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn vault(id: &str, name: &str) -> Vault {
        Vault { id: id.to_string(), name: name.to_string(), ..Default::default() }
    }

    fn summary(id: &str) -> ItemSummary {
        ItemSummary { id: id.to_string(), ..Default::default() }
    }

    #[tokio::test]
    async fn test_get_vault_dispatches_on_id_shape() {
        let api = Recorder { vaults: vec![vault(VAULT_ID, "Shared")], ..Default::default() };

        api.get_vault(VAULT_ID).await.unwrap();
        let by_name = api.get_vault("Shared").await.unwrap();

        assert_eq!(by_name.id, VAULT_ID);
        assert_eq!(
            api.calls(),
            vec![format!("get_vault_by_id {}", VAULT_ID), "get_vaults name eq \"Shared\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_vault_by_title_requires_exactly_one() {
        let none = Recorder::default();
        let err = none.get_vault_by_title("Missing").await.unwrap_err();
        assert!(matches!(
            err,
            ConnectError::AmbiguousLookup { kind: LookupKind::Vault, count: 0, .. }
        ));

        let two = Recorder {
            vaults: vec![vault(VAULT_ID, "Shared"), vault("abcdefghijklmnopqrstuvwxyz", "Shared")],
            ..Default::default()
        };
        let err = two.get_vault_by_title("Shared").await.unwrap_err();
        assert!(matches!(err, ConnectError::AmbiguousLookup { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_get_item_by_title_refetches_by_id() {
        let api = Recorder { summaries: vec![summary(ITEM_ID)], ..Default::default() };

        let item = api.get_item_by_title("Test Login", VAULT_ID).await.unwrap();

        assert_eq!(item.id(), Some(ITEM_ID));
        assert_eq!(
            api.calls(),
            vec![
                format!("get_items {} title eq \"Test Login\"", VAULT_ID),
                format!("get_item_by_id {} {}", ITEM_ID, VAULT_ID),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_item_by_title_ambiguous() {
        let api = Recorder {
            summaries: vec![summary(ITEM_ID), summary("abcdefghijklmnopqrstuvwxyz")],
            ..Default::default()
        };

        let err = api.get_item_by_title("Dup", VAULT_ID).await.unwrap_err();
        assert!(matches!(err, ConnectError::AmbiguousLookup { kind: LookupKind::Item, count: 2, .. }));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_get_item_with_ids_skips_lookups() {
        let api = Recorder::default();

        api.get_item(ITEM_ID, VAULT_ID).await.unwrap();

        assert_eq!(api.calls(), vec![format!("get_item_by_id {} {}", ITEM_ID, VAULT_ID)]);
    }

    #[tokio::test]
    async fn test_get_item_resolves_vault_name_first() {
        let api = Recorder {
            vaults: vec![vault(VAULT_ID, "Shared")],
            summaries: vec![summary(ITEM_ID)],
            ..Default::default()
        };

        api.get_item("Database", "Shared").await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], "get_vaults name eq \"Shared\"");
        assert_eq!(calls[1], format!("get_items {} title eq \"Database\"", VAULT_ID));
        assert_eq!(calls[2], format!("get_item_by_id {} {}", ITEM_ID, VAULT_ID));
    }
}
