use crate::{
    error::{AppError, Result},
    models::{
        session::Session,
        todo::{CONTENT_ATTRIBUTE, CONTENT_MAX_CHARS, TodoItem},
    },
    repositories::{schema as schema_repo, todo as todo_repo},
    state::AppState,
};

/// Makes sure the collection has a required `content` string attribute.
///
/// Runs against the backend at most once per process after it succeeds;
/// a failed check is attempted again on the next call.
pub async fn ensure_content_attribute(state: &AppState) -> Result<()> {
    state
        .content_attribute
        .get_or_try_init(|| async {
            let keys = schema_repo::list_attribute_keys(&state.backend).await?;

            if !keys.iter().any(|key| key == CONTENT_ATTRIBUTE) {
                tracing::info!("📐 Creating content attribute in collection...");
                schema_repo::create_string_attribute(
                    &state.backend,
                    CONTENT_ATTRIBUTE,
                    CONTENT_MAX_CHARS,
                    true,
                )
                .await?;
                tracing::info!("✅ Content attribute created successfully");
            }

            Ok::<(), AppError>(())
        })
        .await?;

    Ok(())
}

/// Lists the session user's items.
pub async fn list_items(state: &AppState, session: &Session) -> Result<Vec<TodoItem>> {
    todo_repo::list_items(&state.backend, &session.secret).await
}

/// Fetches one of the session user's items.
pub async fn get_item(state: &AppState, session: &Session, item_id: &str) -> Result<TodoItem> {
    todo_repo::get_item(&state.backend, &session.secret, item_id).await
}

/// Creates an item owned by the session user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The user's session.
/// * `content` - The validated item text.
///
/// # Returns
///
/// A `Result` containing the created `TodoItem`.
pub async fn create_item(state: &AppState, session: &Session, content: &str) -> Result<TodoItem> {
    ensure_content_attribute(state).await?;

    let item =
        todo_repo::create_item(&state.backend, &session.secret, &session.user_id, content).await?;

    tracing::info!("✅ Item {} created for user: {}", item.id, session.user_id);
    Ok(item)
}

/// Replaces the text of one of the session user's items.
pub async fn update_item(
    state: &AppState,
    session: &Session,
    item_id: &str,
    content: &str,
) -> Result<TodoItem> {
    let item = todo_repo::update_item(&state.backend, &session.secret, item_id, content).await?;

    tracing::info!("✅ Item {} updated for user: {}", item.id, session.user_id);
    Ok(item)
}

/// Deletes one of the session user's items.
pub async fn delete_item(state: &AppState, session: &Session, item_id: &str) -> Result<()> {
    todo_repo::delete_item(&state.backend, &session.secret, item_id).await?;

    tracing::info!("✅ Item {} deleted for user: {}", item_id, session.user_id);
    Ok(())
}
