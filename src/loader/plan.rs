//! Resolution planning
//!
//! Groups checked field declarations by `vault/item` so each item is fetched
//! once per load, keeping the order in which groups were first seen.

use std::collections::HashMap;

use super::tags::{FieldSpec, FieldTag};
use crate::config::LoadContext;
use crate::errors::Result;

/// The fields read from one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionGroup {
    pub vault: String,
    pub item: String,
    pub fields: Vec<FieldTag>,
}

impl ResolutionGroup {
    pub fn key(&self) -> String {
        format!("{}/{}", self.vault, self.item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    groups: Vec<ResolutionGroup>,
}

impl ResolutionPlan {
    /// Check every declaration and group the results.
    ///
    /// The first failing declaration aborts the plan.
    pub fn build<I, N>(entries: I, ctx: &LoadContext) -> Result<Self>
    where
        I: IntoIterator<Item = (N, FieldSpec)>,
        N: Into<String>,
    {
        let tags = entries
            .into_iter()
            .map(|(name, spec)| {
                let name: String = name.into();
                FieldTag::resolve(&name, &spec, ctx)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_tags(tags))
    }

    /// Group already checked tags
    pub fn from_tags(tags: impl IntoIterator<Item = FieldTag>) -> Self {
        let mut groups: Vec<ResolutionGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for tag in tags {
            let position = *index.entry(tag.group_key()).or_insert_with(|| {
                groups.push(ResolutionGroup {
                    vault: tag.vault.clone(),
                    item: tag.item.clone(),
                    fields: Vec::new(),
                });
                groups.len() - 1
            });
            groups[position].fields.push(tag);
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[ResolutionGroup] {
        &self.groups
    }

    /// Number of items to fetch
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of values the plan writes
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }
}
