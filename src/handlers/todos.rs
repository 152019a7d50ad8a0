use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, GENERIC_FAILURE, Result},
    extract::FormOrJson,
    models::session::Session,
    services::todos as todo_service,
    state::AppState,
    validation::todo::{validate_content, validate_item_id},
    views::{fragments, pages},
};

/// The request payload for creating or updating an item.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ItemRequest {
    pub content: String,
}

/// Renders the main page with all of the user's items.
///
/// A failed fetch still renders the page, with a banner and an empty list.
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    match todo_service::list_items(&state, &session).await {
        Ok(items) => Html(pages::index_page(&session, &items, None)).into_response(),
        Err(AppError::Unauthenticated) => AppError::Unauthenticated.into_response(),
        Err(e) => {
            tracing::error!("❌ Failed to fetch documents: {}", e);
            let page = pages::index_page(&session, &[], Some(GENERIC_FAILURE));
            (e.status(), Html(page)).into_response()
        }
    }
}

/// Renders the list rows only.
pub async fn list_items(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>> {
    let items = todo_service::list_items(&state, &session).await?;
    Ok(Html(fragments::item_list(&items)))
}

/// Renders a single row.
pub async fn get_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<String>,
) -> Result<Html<String>> {
    validate_item_id(&item_id)?;

    let item = todo_service::get_item(&state, &session, &item_id).await?;
    Ok(Html(fragments::item(&item)))
}

/// Renders a row in edit mode.
pub async fn edit_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<String>,
) -> Result<Html<String>> {
    validate_item_id(&item_id)?;

    let item = todo_service::get_item(&state, &session, &item_id).await?;
    Ok(Html(fragments::edit_form(&item)))
}

/// Adds a new item and returns its row.
pub async fn create_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    FormOrJson(req): FormOrJson<ItemRequest>,
) -> Result<Html<String>> {
    let content = validate_content(&req.content)?;

    let item = todo_service::create_item(&state, &session, content).await?;
    Ok(Html(fragments::item(&item)))
}

/// Replaces an item's text and returns the updated row.
pub async fn update_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<String>,
    FormOrJson(req): FormOrJson<ItemRequest>,
) -> Result<Html<String>> {
    validate_item_id(&item_id)?;
    let content = validate_content(&req.content)?;

    let item = todo_service::update_item(&state, &session, &item_id, content).await?;
    Ok(Html(fragments::item(&item)))
}

/// Deletes an item. The empty body replaces the row.
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(item_id): Path<String>,
) -> Result<Response> {
    validate_item_id(&item_id)?;

    todo_service::delete_item(&state, &session, &item_id).await?;
    Ok((StatusCode::OK, Html(String::new())).into_response())
}
