use reqwest::Method;

use crate::{
    backend::{BackendClient, Credentials},
    error::Result,
    models::todo::{AttributeList, CreateStringAttribute},
};

/// Lists the attribute keys of the todo collection.
pub async fn list_attribute_keys(backend: &BackendClient) -> Result<Vec<String>> {
    let path = format!("{}/attributes", backend.collection_path());

    let list: AttributeList = backend
        .call::<_, ()>(Method::GET, &path, Credentials::ApiKey, None)
        .await?;

    tracing::debug!("📐 Collection has {} attributes", list.total);
    Ok(list.attributes.into_iter().map(|a| a.key).collect())
}

/// Adds a string attribute to the todo collection.
pub async fn create_string_attribute(
    backend: &BackendClient,
    key: &str,
    size: usize,
    required: bool,
) -> Result<()> {
    let path = format!("{}/attributes/string", backend.collection_path());
    let body = CreateStringAttribute {
        key,
        size,
        required,
    };

    backend
        .call::<sonic_rs::Value, _>(Method::POST, &path, Credentials::ApiKey, Some(&body))
        .await?;

    Ok(())
}
