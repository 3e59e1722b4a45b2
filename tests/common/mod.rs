//! Shared helpers for the Connect integration tests
//!
//! Every test starts its own wiremock server that plays the Connect API.

#![allow(dead_code)]

use opconnect::{Client, ClientConfig};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-connect-token";
pub const VAULT_ID: &str = "hfnjvi6aymbsnfc2xeeoheizda";
pub const OTHER_VAULT_ID: &str = "abcdefghijklmnopqrstuvwxyz";
pub const ITEM_ID: &str = "wepiqdxdzncjtnvmv5fegud4qy";
pub const FILE_ID: &str = "fileqdxczsc2tn32vsfegud123";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri(), TOKEN).with_timeout(5)
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(config_for(server)).expect("client should build")
}

pub async fn start() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    (server, client)
}

pub fn vault_path(vault_id: &str) -> String {
    format!("/v1/vaults/{}", vault_id)
}

pub fn items_path(vault_id: &str) -> String {
    format!("/v1/vaults/{}/items", vault_id)
}

pub fn item_path(vault_id: &str, item_id: &str) -> String {
    format!("/v1/vaults/{}/items/{}", vault_id, item_id)
}

pub fn vault_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "attributeVersion": 1,
        "contentVersion": 12,
        "items": 3,
        "type": "USER_CREATED",
        "createdAt": "2021-04-10T17:34:26Z",
        "updatedAt": "2021-04-13T14:33:50Z"
    })
}

pub fn summary_json(id: &str, title: &str, vault_id: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "version": 2,
        "vault": {"id": vault_id},
        "category": "LOGIN",
        "createdAt": "2021-04-10T17:34:26Z",
        "updatedAt": "2021-04-13T14:33:50Z"
    })
}

/// A login item with a section-less username and a sectioned password
pub fn login_item_json(id: &str, title: &str, vault_id: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "version": 2,
        "vault": {"id": vault_id},
        "category": "LOGIN",
        "sections": [
            {"id": "s1", "label": "credentials"},
            {"id": "s2", "label": "metadata"}
        ],
        "fields": [
            {"id": "username", "type": "STRING", "purpose": "USERNAME", "label": "username", "value": "admin"},
            {"id": "password", "type": "CONCEALED", "purpose": "PASSWORD", "label": "password", "value": "s3cret", "section": {"id": "s1"}},
            {"id": "host", "type": "STRING", "label": "host", "value": "db.internal", "section": {"id": "s2"}}
        ],
        "createdAt": "2021-04-10T17:34:26Z",
        "updatedAt": "2021-04-13T14:33:50Z"
    })
}

/// Serve `GET /v1/vaults?filter=name eq "<name>"`
pub async fn mount_vault_lookup(server: &MockServer, name: &str, vaults: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/vaults"))
        .and(query_param("filter", format!("name eq \"{}\"", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(vaults))
        .mount(server)
        .await;
}

/// Serve `GET /v1/vaults/{v}/items?filter=title eq "<title>"`
pub async fn mount_item_lookup(server: &MockServer, vault_id: &str, title: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(items_path(vault_id)))
        .and(query_param("filter", format!("title eq \"{}\"", title)))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Serve an item detail and require it to be fetched exactly `times` times
pub async fn mount_item(server: &MockServer, vault_id: &str, item_id: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(item_path(vault_id, item_id)))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

pub fn error_body(status: u16, message: &str) -> Value {
    json!({"status": status, "message": message})
}
