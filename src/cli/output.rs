//! Shared output formatting utilities for CLI commands
//!
//! JSON and YAML for scripting, a plain table for humans.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Item, ItemSummary, Vault};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Placeholder printed instead of a secret value
pub const MASK: &str = "********";

/// Print data in the specified OutputFormat. Table output falls back to YAML
/// for data without a table layout, as the `--output` help states.
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Yaml | OutputFormat::Table => print_yaml(data),
    }
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize to YAML")?;
    println!("{}", yaml);
    Ok(())
}

/// Truncate string to maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a horizontal separator line
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    println!();
    let mut header = String::new();
    for (name, width) in columns {
        header.push_str(&format!("{:<width$} ", name, width = width));
    }
    println!("{}", header.trim());

    let total_width: usize = columns.iter().map(|(_, w)| w + 1).sum();
    print_separator(total_width.saturating_sub(1));
}

pub fn print_vaults(vaults: &[Vault], format: OutputFormat) -> Result<()> {
    if format != OutputFormat::Table {
        return print_output(&vaults, format);
    }

    print_table_header(&[("ID", 26), ("Name", 30), ("Items", 6), ("Type", 14)]);
    for vault in vaults {
        println!(
            "{:<26} {:<30} {:<6} {}",
            vault.id,
            truncate(&vault.name, 30),
            vault.items.map(|n| n.to_string()).unwrap_or_default(),
            vault.vault_type.as_deref().unwrap_or("")
        );
    }
    println!();
    Ok(())
}

pub fn print_item_summaries(items: &[ItemSummary], format: OutputFormat) -> Result<()> {
    if format != OutputFormat::Table {
        return print_output(&items, format);
    }

    print_table_header(&[("ID", 26), ("Title", 36), ("Category", 16), ("Updated", 20)]);
    for item in items {
        println!(
            "{:<26} {:<36} {:<16} {}",
            item.id,
            truncate(&item.title, 36),
            item.category.as_deref().unwrap_or(""),
            item.updated_at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default()
        );
    }
    println!();
    Ok(())
}

/// Replace every non-empty field value with [`MASK`]
pub fn mask_item(mut item: Item) -> Item {
    for field in &mut item.fields {
        if field.value.as_deref().is_some_and(|v| !v.is_empty()) {
            field.value = Some(MASK.to_string());
        }
        field.totp = None;
    }
    item
}

pub fn mask_value(value: &str) -> &str {
    if value.is_empty() {
        value
    } else {
        MASK
    }
}
