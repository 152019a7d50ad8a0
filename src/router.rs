use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    compression::CompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware_layer, state::AppState};

/// Largest request body accepted. Forms here are a few hundred bytes.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Builds the application router.
///
/// In debug mode request headers are recorded on each request span.
pub fn build_router(state: AppState) -> Router {
    let include_headers = state.config.debug;

    let public_routes = Router::new()
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/health", get(handlers::health::health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/", get(handlers::todos::index))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/items",
            get(handlers::todos::list_items).post(handlers::todos::create_item),
        )
        .route(
            "/items/{item_id}",
            get(handlers::todos::get_item)
                .put(handlers::todos::update_item)
                .delete(handlers::todos::delete_item),
        )
        .route("/items/{item_id}/edit", get(handlers::todos::edit_item))
        .route_layer(from_fn(middleware_layer::csrf::verify_csrf))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(include_headers),
                )
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CompressionLayer::new())
        .layer(CookieManagerLayer::new())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
