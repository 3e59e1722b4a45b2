//! Domain layer
//!
//! Wire-level entities of the Connect API (vaults, items, sections, fields,
//! files) and identifier classification. No transport code lives here.

pub mod file;
pub mod id;
pub mod item;
pub mod vault;

pub use file::File;
pub use id::{is_id, Reference, ID_LENGTH};
pub use item::{
    Field, FieldSection, GeneratorRecipe, Item, ItemSummary, ItemUrl, ItemVault, Section,
};
pub use vault::Vault;

use serde::Deserialize;

/// Error body returned by the Connect server on failures
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,
}
