//! End-to-end config loading against a mocked Connect server

mod common;

use std::collections::BTreeMap;

use common::*;
use opconnect::loader::{self, FieldSpec};
use opconnect::{tagged_config, ConnectError, LoadContext};
use serde_json::json;

fn ctx() -> LoadContext {
    LoadContext::new().with_default_vault(VAULT_ID)
}

tagged_config! {
    pub struct DatabaseConfig {
        pub username => "opitem:Database opfield:.username",
        pub password => "opitem:Database opfield:credentials.password",
        pub host => "opitem:Database opfield:metadata.host opvault:Shared",
    }
}

#[tokio::test]
async fn test_field_without_section() {
    let (server, client) = start().await;
    mount_item(
        &server,
        VAULT_ID,
        ITEM_ID,
        json!({"id": ITEM_ID, "fields": [{"label": "username", "value": "new_user"}]}),
        1,
    )
    .await;

    let values =
        loader::load_dict(&client, &ctx(), [("user", FieldSpec::new(ITEM_ID, ".username"))]).await.unwrap();

    assert_eq!(values["user"], "new_user");
}

fn two_section_item() -> serde_json::Value {
    json!({
        "id": ITEM_ID,
        "sections": [{"id": "s1", "label": "section1"}, {"id": "s2", "label": "section2"}],
        "fields": [{"label": "password", "value": "pw", "section": {"id": "s1"}}]
    })
}

#[tokio::test]
async fn test_field_in_matching_section() {
    let (server, client) = start().await;
    mount_item(&server, VAULT_ID, ITEM_ID, two_section_item(), 1).await;

    let values = loader::load_dict(&client, &ctx(), [("pw", FieldSpec::new(ITEM_ID, "section1.password"))])
        .await
        .unwrap();

    assert_eq!(values["pw"], "pw");
}

#[tokio::test]
async fn test_field_in_other_section_fails() {
    let (server, client) = start().await;
    mount_item(&server, VAULT_ID, ITEM_ID, two_section_item(), 1).await;

    let err = loader::load_dict(&client, &ctx(), [("pw", FieldSpec::new(ITEM_ID, "section2.password"))])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConnectError::UnknownSectionOrField { ref section, ref field }
            if section == "section2" && field == "password"
    ));
}

#[tokio::test]
async fn test_label_match_beats_id_match() {
    let (server, client) = start().await;
    mount_item(
        &server,
        VAULT_ID,
        ITEM_ID,
        json!({
            "id": ITEM_ID,
            "fields": [
                {"id": "shared_ref", "label": "wrong_label", "value": "A"},
                {"id": "other_id", "label": "shared_ref", "value": "B"}
            ]
        }),
        1,
    )
    .await;

    let values = loader::load_dict(&client, &ctx(), [("ref", FieldSpec::new(ITEM_ID, ".shared_ref"))])
        .await
        .unwrap();

    assert_eq!(values["ref"], "B");
}

#[tokio::test]
async fn test_shared_item_is_fetched_once() {
    let (server, client) = start().await;
    mount_item_lookup(&server, VAULT_ID, "X", json!([summary_json(ITEM_ID, "X", VAULT_ID)])).await;
    mount_item(&server, VAULT_ID, ITEM_ID, login_item_json(ITEM_ID, "X", VAULT_ID), 1).await;

    let values = loader::load_dict(
        &client,
        &ctx(),
        [
            ("user", FieldSpec::parse("user", r#"opitem:"X" opfield:.username"#).unwrap()),
            ("pass", FieldSpec::parse("pass", r#"opitem:"X" opfield:credentials.password"#).unwrap()),
        ],
    )
    .await
    .unwrap();

    assert_eq!(values["user"], "admin");
    assert_eq!(values["pass"], "s3cret");
}

#[tokio::test]
async fn test_declaration_errors_send_no_requests() {
    let (server, client) = start().await;

    let missing_field = loader::load_dict(
        &client,
        &ctx(),
        [
            ("user", FieldSpec::new(ITEM_ID, ".username")),
            ("pass", FieldSpec { item: Some(ITEM_ID.to_string()), ..Default::default() }),
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(missing_field, ConnectError::MissingFieldTag { ref logical_name } if logical_name == "pass"));

    let bad_path =
        loader::load_dict(&client, &ctx(), [("pass", FieldSpec::new(ITEM_ID, "a.b.c"))]).await.unwrap_err();
    assert!(matches!(bad_path, ConnectError::InvalidFieldPath { .. }));

    let no_vault = loader::load_dict(&client, &LoadContext::new(), [("pass", FieldSpec::new(ITEM_ID, ".p"))])
        .await
        .unwrap_err();
    assert!(matches!(no_vault, ConnectError::NoVaultForField { .. }));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_vault_overrides_default() {
    let (server, client) = start().await;
    mount_item(&server, OTHER_VAULT_ID, ITEM_ID, login_item_json(ITEM_ID, "Database", OTHER_VAULT_ID), 1).await;

    let values = loader::load_dict(
        &client,
        &ctx(),
        [("user", FieldSpec::new(ITEM_ID, ".username").with_vault(OTHER_VAULT_ID))],
    )
    .await
    .unwrap();

    assert_eq!(values["user"], "admin");
}

#[tokio::test]
async fn test_load_tagged_config() {
    let (server, client) = start().await;
    mount_vault_lookup(&server, "Shared", json!([vault_json(OTHER_VAULT_ID, "Shared")])).await;
    mount_item_lookup(&server, VAULT_ID, "Database", json!([summary_json(ITEM_ID, "Database", VAULT_ID)]))
        .await;
    mount_item_lookup(
        &server,
        OTHER_VAULT_ID,
        "Database",
        json!([summary_json(ITEM_ID, "Database", OTHER_VAULT_ID)]),
    )
    .await;
    mount_item(&server, VAULT_ID, ITEM_ID, login_item_json(ITEM_ID, "Database", VAULT_ID), 1).await;
    mount_item(&server, OTHER_VAULT_ID, ITEM_ID, login_item_json(ITEM_ID, "Database", OTHER_VAULT_ID), 1)
        .await;

    let mut config = DatabaseConfig::default();
    loader::load(&client, &ctx(), &mut config).await.unwrap();

    assert_eq!(config.username.as_deref(), Some("admin"));
    assert_eq!(config.password.as_deref(), Some("s3cret"));
    assert_eq!(config.host.as_deref(), Some("db.internal"));
}

#[tokio::test]
async fn test_failure_keeps_earlier_values() {
    let (server, client) = start().await;
    mount_item(&server, VAULT_ID, ITEM_ID, login_item_json(ITEM_ID, "Database", VAULT_ID), 1).await;
    mount_item_lookup(&server, VAULT_ID, "Gone", json!([])).await;

    let mut values = BTreeMap::new();
    let err = loader::load_dict_into(
        &client,
        &ctx(),
        [
            ("user", FieldSpec::new(ITEM_ID, ".username")),
            ("gone", FieldSpec::new("Gone", ".token")),
        ],
        &mut values,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ConnectError::AmbiguousLookup { count: 0, .. }));
    assert_eq!(values.get("user").map(String::as_str), Some("admin"));
    assert!(!values.contains_key("gone"));
}

#[tokio::test]
async fn test_declaration_file_order_is_resolution_order() {
    let (server, client) = start().await;
    mount_item(
        &server,
        VAULT_ID,
        ITEM_ID,
        json!({"id": ITEM_ID, "fields": [
            {"label": "user", "value": "admin"},
            {"label": "token", "value": "t0k"}
        ]}),
        1,
    )
    .await;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("secrets.toml");
    std::fs::write(
        &path,
        format!(
            "[zeta]\nopitem = \"{id}\"\nopfield = \".token\"\n\n[alpha]\nopitem = \"{id}\"\nopfield = \".user\"\n",
            id = ITEM_ID
        ),
    )
    .unwrap();

    let declarations = opconnect::cli::config::read_declarations(&path).unwrap();
    let mut values: indexmap::IndexMap<String, String> = indexmap::IndexMap::new();
    loader::load_dict_into(&client, &ctx(), declarations, &mut values).await.unwrap();

    let names: Vec<&str> = values.keys().map(String::as_str).collect();
    assert_eq!(names, ["zeta", "alpha"]);
    assert_eq!(values["alpha"], "admin");
}
