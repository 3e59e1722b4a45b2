//! Vault domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_version: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<u64>,

    /// Number of active items in the vault
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<u64>,

    /// USER_CREATED, PERSONAL, EVERYONE or TRANSFER
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vault_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
