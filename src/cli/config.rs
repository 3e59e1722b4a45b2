//! CLI connection settings
//!
//! Resolves the client settings from command line flags, falling back to the
//! `OP_CONNECT_*` environment variables (which `.env` may populate).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::{timeout_from_env, ClientConfig, ENV_CONNECT_HOST, ENV_CONNECT_TOKEN, ENV_VAULT};
use crate::loader::FieldSpec;

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the Connect host from the --host flag or `OP_CONNECT_HOST`
pub fn resolve_host(host_flag: Option<String>) -> Result<String> {
    if let Some(host) = host_flag {
        debug!("Using host from --host flag: {}", host);
        return Ok(host);
    }

    env_value(ENV_CONNECT_HOST)
        .with_context(|| format!("No Connect host given. Use --host or set {}", ENV_CONNECT_HOST))
}

/// Resolve the token from --token, --token-file or `OP_CONNECT_TOKEN`, in that order
pub fn resolve_token(token_flag: Option<String>, token_file_flag: Option<PathBuf>) -> Result<String> {
    if let Some(token) = token_flag {
        debug!("Using token from --token flag");
        return Ok(token);
    }

    if let Some(token_file) = token_file_flag {
        debug!("Reading token from file: {}", token_file.display());
        let token = std::fs::read_to_string(&token_file)
            .with_context(|| format!("Failed to read token file: {}", token_file.display()))?
            .trim()
            .to_string();

        if token.is_empty() {
            anyhow::bail!("Token file is empty: {}", token_file.display());
        }

        return Ok(token);
    }

    env_value(ENV_CONNECT_TOKEN).with_context(|| {
        format!("No Connect token given. Use --token, --token-file or set {}", ENV_CONNECT_TOKEN)
    })
}

/// Resolve the request timeout from --timeout, `OP_CONNECT_CLIENT_REQ_TIMEOUT` or the default
pub fn resolve_timeout(timeout_flag: Option<u64>) -> Result<u64> {
    if let Some(timeout) = timeout_flag {
        debug!("Using timeout from --timeout flag: {} seconds", timeout);
        return Ok(timeout);
    }

    Ok(timeout_from_env()?)
}

/// Resolve the vault from --vault or `OP_VAULT`
pub fn resolve_vault(vault_flag: Option<String>) -> Option<String> {
    vault_flag.filter(|v| !v.is_empty()).or_else(|| env_value(ENV_VAULT))
}

/// Build and validate the client settings
pub fn client_config(
    host: Option<String>,
    token: Option<String>,
    token_file: Option<PathBuf>,
    timeout: Option<u64>,
    ca_file: Option<PathBuf>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::new(resolve_host(host)?, resolve_token(token, token_file)?)
        .with_timeout(resolve_timeout(timeout)?);
    if let Some(ca_file) = ca_file {
        config = config.with_ca_file(ca_file);
    }

    config.validate()?;
    Ok(config)
}

/// Read a TOML file of `[logical_name]` tables holding `opitem`, `opfield`
/// and optionally `opvault`, in document order
pub fn read_declarations(path: &Path) -> Result<IndexMap<String, FieldSpec>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
