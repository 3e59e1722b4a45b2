//! Field declarations
//!
//! A field is declared either structurally ([`FieldSpec`]) or with the tag
//! syntax `opitem:"<title-or-id>" opfield:<section>.<field> opvault:<vault>`.
//! Both forms are checked into a [`FieldTag`] before any request is made.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LoadContext;
use crate::errors::{ConnectError, Result};

pub const ITEM_TAG: &str = "opitem";
pub const FIELD_TAG: &str = "opfield";
pub const VAULT_TAG: &str = "opvault";

/// Where a value lives, as declared by the caller. Nothing is checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "opitem", alias = "item", default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    #[serde(rename = "opfield", alias = "field", default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(rename = "opvault", alias = "vault", default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,
}

impl FieldSpec {
    pub fn new(item: impl Into<String>, field: impl Into<String>) -> Self {
        Self { item: Some(item.into()), field: Some(field.into()), vault: None }
    }

    pub fn with_vault(mut self, vault: impl Into<String>) -> Self {
        self.vault = Some(vault.into());
        self
    }

    /// Parse a tag string.
    ///
    /// Tokens are split with shell-word rules, so quoted values may contain
    /// spaces and a word starting with `#` comments out the rest. Only the
    /// first `:` of a token separates key from value. Unknown keys are ignored
    /// and a repeated key keeps its last value.
    pub fn parse(logical_name: &str, tags: &str) -> Result<Self> {
        let malformed = |reason: String| ConnectError::MalformedTag {
            logical_name: logical_name.to_string(),
            reason,
        };

        let mut spec = Self::default();
        for token in shell_words::split(tags).map_err(|e| malformed(e.to_string()))? {
            let (key, value) = token
                .split_once(':')
                .ok_or_else(|| malformed(format!("expected key:value, got '{}'", token)))?;

            match key {
                ITEM_TAG => spec.item = Some(value.to_string()),
                FIELD_TAG => spec.field = Some(value.to_string()),
                VAULT_TAG => spec.vault = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(spec)
    }
}

/// Renders the tag syntax accepted by [`FieldSpec::parse`]
impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = [(ITEM_TAG, &self.item), (FIELD_TAG, &self.field), (VAULT_TAG, &self.vault)];
        let mut first = true;
        for (key, value) in pairs {
            if let Some(value) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}:{}", key, shell_words::quote(value))?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A checked field declaration: the vault is settled and the path is split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    pub logical_name: String,
    pub item: String,
    /// Section label; empty for fields addressed without a section
    pub section: String,
    pub field: String,
    pub vault: String,
}

impl FieldTag {
    /// Check a declaration.
    ///
    /// Checks run in order: item present, field present, field path made of
    /// exactly two `.` separated parts, then the vault (falling back to the
    /// context default when absent or empty).
    pub fn resolve(logical_name: &str, spec: &FieldSpec, ctx: &LoadContext) -> Result<Self> {
        let item = match spec.item.as_deref() {
            Some(item) if !item.is_empty() => item,
            _ => {
                return Err(ConnectError::MissingItemTag { logical_name: logical_name.to_string() })
            }
        };

        let path = spec
            .field
            .as_deref()
            .ok_or_else(|| ConnectError::MissingFieldTag { logical_name: logical_name.to_string() })?;

        let parts: Vec<&str> = path.split('.').collect();
        let [section, field] = parts.as_slice() else {
            return Err(ConnectError::InvalidFieldPath {
                logical_name: logical_name.to_string(),
                path: path.to_string(),
            });
        };

        let vault = spec
            .vault
            .as_deref()
            .filter(|vault| !vault.is_empty())
            .or_else(|| ctx.default_vault())
            .ok_or_else(|| ConnectError::NoVaultForField { logical_name: logical_name.to_string() })?;

        Ok(Self {
            logical_name: logical_name.to_string(),
            item: item.to_string(),
            section: section.to_string(),
            field: field.to_string(),
            vault: vault.to_string(),
        })
    }

    /// Parse and check a tag string
    pub fn parse(logical_name: &str, tags: &str, ctx: &LoadContext) -> Result<Self> {
        Self::resolve(logical_name, &FieldSpec::parse(logical_name, tags)?, ctx)
    }

    /// `<section>.<field>`
    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.field)
    }

    /// Fields sharing this key are read from a single fetch of the item
    pub fn group_key(&self) -> String {
        format!("{}/{}", self.vault, self.item)
    }
}
