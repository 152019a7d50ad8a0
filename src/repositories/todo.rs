use reqwest::Method;

use crate::{
    backend::{BackendClient, Credentials, UNIQUE_ID},
    error::Result,
    models::todo::{
        CreateDocument, DocumentList, TodoData, TodoItem, UpdateDocument, owner_permissions,
    },
};

/// Lists every item the session's user can read.
pub async fn list_items(backend: &BackendClient, secret: &str) -> Result<Vec<TodoItem>> {
    let path = format!("{}/documents", backend.collection_path());

    let list: DocumentList<TodoItem> = backend
        .call::<_, ()>(Method::GET, &path, Credentials::Session(secret), None)
        .await?;

    tracing::debug!("📄 Listed {} of {} items", list.documents.len(), list.total);
    Ok(list.documents)
}

/// Fetches a single item.
pub async fn get_item(backend: &BackendClient, secret: &str, item_id: &str) -> Result<TodoItem> {
    let path = format!("{}/documents/{}", backend.collection_path(), item_id);

    backend
        .call::<_, ()>(Method::GET, &path, Credentials::Session(secret), None)
        .await
}

/// Creates an item owned by `user_id`.
///
/// # Arguments
///
/// * `backend` - The backend client.
/// * `secret` - The session secret of the creating user.
/// * `user_id` - The ID of the user who owns the item.
/// * `content` - The item text.
///
/// # Returns
///
/// A `Result` containing the created `TodoItem`.
pub async fn create_item(
    backend: &BackendClient,
    secret: &str,
    user_id: &str,
    content: &str,
) -> Result<TodoItem> {
    let path = format!("{}/documents", backend.collection_path());
    let body = CreateDocument {
        document_id: UNIQUE_ID,
        data: TodoData { content },
        permissions: owner_permissions(user_id),
    };

    backend
        .call(Method::POST, &path, Credentials::Session(secret), Some(&body))
        .await
}

/// Replaces an item's text.
pub async fn update_item(
    backend: &BackendClient,
    secret: &str,
    item_id: &str,
    content: &str,
) -> Result<TodoItem> {
    let path = format!("{}/documents/{}", backend.collection_path(), item_id);
    let body = UpdateDocument {
        data: TodoData { content },
    };

    backend
        .call(Method::PATCH, &path, Credentials::Session(secret), Some(&body))
        .await
}

/// Deletes an item.
pub async fn delete_item(backend: &BackendClient, secret: &str, item_id: &str) -> Result<()> {
    let path = format!("{}/documents/{}", backend.collection_path(), item_id);

    backend
        .call_empty(Method::DELETE, &path, Credentials::Session(secret))
        .await
}
