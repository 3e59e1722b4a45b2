//! File attachment domain types

use serde::{Deserialize, Serialize};

use super::item::FieldSection;

/// A file attached to an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Server path of the raw content, e.g. `/v1/vaults/{v}/items/{i}/files/{f}/content`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<FieldSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_deserialize() {
        let json = r#"{
            "id": "fileqdxczsc2tn32vsfegud123",
            "name": "cert.pem",
            "size": 1024,
            "content_path": "/v1/vaults/v/items/i/files/fileqdxczsc2tn32vsfegud123/content"
        }"#;
        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.name.as_deref(), Some("cert.pem"));
        assert_eq!(file.size, Some(1024));
        assert!(file.content_path.unwrap().ends_with("/content"));
        assert!(file.section.is_none());
    }
}
