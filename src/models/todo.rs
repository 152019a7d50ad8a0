use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the document attribute holding an item's text.
pub const CONTENT_ATTRIBUTE: &str = "content";
/// Maximum length of an item's text, in characters.
pub const CONTENT_MAX_CHARS: usize = 128;

/// A todo item, as stored in the backend collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    /// The document id.
    #[serde(rename = "$id")]
    pub id: String,
    /// The item text.
    #[serde(default)]
    pub content: String,
    /// The timestamp when the item was created.
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// The timestamp when the item was last updated.
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A page of documents returned by a list call.
#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// The writable fields of an item.
#[derive(Debug, Serialize)]
pub struct TodoData<'a> {
    pub content: &'a str,
}

/// Body of a document create call.
#[derive(Debug, Serialize)]
pub struct CreateDocument<'a> {
    #[serde(rename = "documentId")]
    pub document_id: &'a str,
    pub data: TodoData<'a>,
    pub permissions: Vec<String>,
}

/// Body of a document update call.
#[derive(Debug, Serialize)]
pub struct UpdateDocument<'a> {
    pub data: TodoData<'a>,
}

/// A collection attribute. Only the key matters here.
#[derive(Debug, Deserialize)]
pub struct Attribute {
    pub key: String,
}

/// Attributes of a collection.
#[derive(Debug, Deserialize)]
pub struct AttributeList {
    pub total: u64,
    pub attributes: Vec<Attribute>,
}

/// Body of a string attribute create call.
#[derive(Debug, Serialize)]
pub struct CreateStringAttribute<'a> {
    pub key: &'a str,
    pub size: usize,
    pub required: bool,
}

/// Permissions granting a single user full control of a document.
pub fn owner_permissions(user_id: &str) -> Vec<String> {
    ["read", "update", "delete"]
        .iter()
        .map(|action| format!("{}(\"user:{}\")", action, user_id))
        .collect()
}
