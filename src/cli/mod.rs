//! # Command Line Interface
//!
//! `opconnect` inspects vaults, items and files on a Connect server and
//! resolves field declarations the same way the library loader does.

pub mod config;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::LoadContext;
use crate::connect::{Client, ConnectApi};
use crate::loader::{self, FieldSpec, FieldTag, ResolutionPlan};
use crate::observability::init_logging;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "opconnect")]
#[command(about = "Read vaults, items and config values from a 1Password Connect server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Connect server URL (defaults to OP_CONNECT_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Connect access token (defaults to OP_CONNECT_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to a file containing the access token
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// PEM file with extra trusted CA certificates
    #[arg(long, global = true)]
    pub ca_file: Option<PathBuf>,

    /// Vault id or name (defaults to OP_VAULT)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Output format. `table` lays out vault and item listings as columns,
    /// prints resolved values as name=value lines and falls back to YAML for
    /// single vaults, items and file lists
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List vaults
    Vaults {
        /// Server side filter, e.g. 'name eq "Shared"'
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show one vault by id or name
    Vault { vault: String },

    /// List the items of the selected vault
    Items {
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show one item by id or title
    Item {
        item: String,

        /// Print field values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Delete an item by id or title
    DeleteItem { item: String },

    /// List the files attached to an item
    Files { item: String },

    /// Download an attached file
    Download {
        item: String,

        /// File id
        file: String,

        /// Target directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Resolve a single tag such as 'opitem:Database opfield:.password'
    Resolve {
        tag: String,

        #[arg(long)]
        reveal: bool,
    },

    /// Resolve every declaration of a TOML file
    Load {
        file: PathBuf,

        #[arg(long)]
        reveal: bool,
    },
}

/// Run CLI commands
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let client_config = config::client_config(
        cli.host.clone(),
        cli.token.clone(),
        cli.token_file.clone(),
        cli.timeout,
        cli.ca_file.clone(),
    )?;
    let client = Client::new(client_config)?;
    let vault = config::resolve_vault(cli.vault.clone());

    handle_command(cli.command, &client, vault, cli.output).await
}

async fn handle_command(
    command: Commands,
    client: &Client,
    vault: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Vaults { filter } => {
            let vaults = client.get_vaults(filter.as_deref()).await?;
            output::print_vaults(&vaults, format)?;
        }
        Commands::Vault { vault } => {
            let vault = client.get_vault(&vault).await?;
            output::print_output(&vault, format)?;
        }
        Commands::Items { filter } => {
            let vault_id = vault_id(client, vault).await?;
            let items = client.get_items(&vault_id, filter.as_deref()).await?;
            output::print_item_summaries(&items, format)?;
        }
        Commands::Item { item, reveal } => {
            let vault = require_vault(vault)?;
            let item = client.get_item(&item, &vault).await?;
            let item = if reveal { item } else { output::mask_item(item) };
            output::print_output(&item, format)?;
        }
        Commands::DeleteItem { item } => {
            let vault = require_vault(vault)?;
            let item = client.get_item(&item, &vault).await?;
            let (Some(item_id), Some(vault_id)) = (item.id(), item.vault_id()) else {
                anyhow::bail!("Server returned an item without id or vault");
            };
            client.delete_item(item_id, vault_id).await?;
            println!("Deleted item {}", item_id);
        }
        Commands::Files { item } => {
            let vault_id = vault_id(client, vault).await?;
            let item_id = item_id(client, &item, &vault_id).await?;
            let files = client.get_files(&item_id, &vault_id).await?;
            output::print_output(&files, format)?;
        }
        Commands::Download { item, file, dir } => {
            let vault_id = vault_id(client, vault).await?;
            let item_id = item_id(client, &item, &vault_id).await?;
            let path = client.download_file(&file, &item_id, &vault_id, &dir).await?;
            println!("Saved {}", path.display());
        }
        Commands::Resolve { tag, reveal } => {
            let ctx = load_context(vault);
            let tag = FieldTag::parse("value", &tag, &ctx)?;
            let mut values: IndexMap<String, String> = IndexMap::new();
            loader::resolve_plan(client, &ResolutionPlan::from_tags([tag]), &mut values).await?;
            print_values(values, reveal, format)?;
        }
        Commands::Load { file, reveal } => {
            let ctx = load_context(vault);
            let declarations: IndexMap<String, FieldSpec> = config::read_declarations(&file)?;
            debug!(count = declarations.len(), file = %file.display(), "Loaded declarations");

            let mut values: IndexMap<String, String> = IndexMap::new();
            loader::load_dict_into(client, &ctx, declarations, &mut values).await?;
            print_values(values, reveal, format)?;
        }
    }

    Ok(())
}

fn load_context(vault: Option<String>) -> LoadContext {
    match vault {
        Some(vault) => LoadContext::new().with_default_vault(vault),
        None => LoadContext::new(),
    }
}

fn require_vault(vault: Option<String>) -> Result<String> {
    vault.context("No vault selected. Use --vault or set OP_VAULT")
}

async fn vault_id(client: &Client, vault: Option<String>) -> Result<String> {
    let vault = require_vault(vault)?;
    if crate::domain::is_id(&vault) {
        return Ok(vault);
    }
    Ok(client.get_vault_by_title(&vault).await?.id)
}

async fn item_id(client: &Client, item: &str, vault_id: &str) -> Result<String> {
    if crate::domain::is_id(item) {
        return Ok(item.to_string());
    }
    let item = client.get_item_by_title(item, vault_id).await?;
    item.id.context("Server returned an item without id")
}

fn print_values(values: IndexMap<String, String>, reveal: bool, format: OutputFormat) -> Result<()> {
    let values: IndexMap<String, String> = if reveal {
        values
    } else {
        values.into_iter().map(|(name, value)| (name, output::mask_value(&value).to_string())).collect()
    };

    if format == OutputFormat::Table {
        for (name, value) in &values {
            println!("{}={}", name, value);
        }
        return Ok(());
    }
    output::print_output(&values, format)
}
