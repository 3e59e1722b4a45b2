//! # Declarative Config Loading
//!
//! Fills a map or a [`tagged_config!`](crate::tagged_config) struct with field
//! values stored in Connect items.
//!
//! Every declaration is checked before the first request. Declarations that
//! point at the same `vault/item` share one fetch of that item, and items are
//! fetched one after the other in the order they were first declared. When a
//! fetch or lookup fails, values already written stay in the sink.
//!
//! ```rust,ignore
//! let ctx = LoadContext::from_env();
//! let values = loader::load_dict(&client, &ctx, [
//!     ("username", FieldSpec::new("Database", ".username")),
//!     ("password", FieldSpec::new("Database", "credentials.password")),
//! ]).await?;
//! ```

pub mod locate;
pub mod plan;
pub mod sink;
pub mod tags;

pub use locate::locate;
pub use plan::{ResolutionGroup, ResolutionPlan};
pub use sink::{TaggedConfig, ValueSink};
pub use tags::{FieldSpec, FieldTag, FIELD_TAG, ITEM_TAG, VAULT_TAG};

use std::collections::HashMap;

use tracing::{debug, instrument, Instrument};

use crate::config::LoadContext;
use crate::connect::ConnectApi;
use crate::errors::Result;
use crate::load_span;

/// Resolve named declarations into a new map
pub async fn load_dict<C, I, N>(
    client: &C,
    ctx: &LoadContext,
    config: I,
) -> Result<HashMap<String, String>>
where
    C: ConnectApi + ?Sized,
    I: IntoIterator<Item = (N, FieldSpec)>,
    N: Into<String>,
{
    let mut values = HashMap::new();
    load_dict_into(client, ctx, config, &mut values).await?;
    Ok(values)
}

/// Resolve named declarations into an existing sink
pub async fn load_dict_into<C, I, N, S>(
    client: &C,
    ctx: &LoadContext,
    config: I,
    sink: &mut S,
) -> Result<()>
where
    C: ConnectApi + ?Sized,
    I: IntoIterator<Item = (N, FieldSpec)>,
    N: Into<String>,
    S: ValueSink + ?Sized,
{
    let plan = ResolutionPlan::build(config, ctx)?;
    resolve_plan(client, &plan, sink).await
}

/// Fill every declared slot of a tagged config struct
pub async fn load<C, T>(client: &C, ctx: &LoadContext, target: &mut T) -> Result<()>
where
    C: ConnectApi + ?Sized,
    T: TaggedConfig,
{
    let entries = T::field_tags()
        .iter()
        .map(|(name, tags)| FieldSpec::parse(name, tags).map(|spec| (*name, spec)))
        .collect::<Result<Vec<_>>>()?;

    let plan = ResolutionPlan::build(entries, ctx)?;
    resolve_plan(client, &plan, target).await
}

/// Fetch each planned item once and write its fields into `sink`
#[instrument(skip_all, fields(items = plan.len(), field_count = plan.field_count()))]
pub async fn resolve_plan<C, S>(client: &C, plan: &ResolutionPlan, sink: &mut S) -> Result<()>
where
    C: ConnectApi + ?Sized,
    S: ValueSink + ?Sized,
{
    for group in plan.groups() {
        let item = client
            .get_item(&group.item, &group.vault)
            .instrument(load_span!(group.vault, group.item))
            .await?;

        for tag in &group.fields {
            let value = locate(&item, &tag.section, &tag.field)?;
            sink.set_value(&tag.logical_name, value)?;
            debug!(name = %tag.logical_name, path = %tag.path(), "Resolved field");
        }
    }
    Ok(())
}
