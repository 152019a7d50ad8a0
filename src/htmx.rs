use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

/// Set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";
/// Makes htmx navigate the whole page instead of swapping.
pub const HX_REDIRECT: &str = "hx-redirect";
/// Overrides the swap style of the triggering element.
pub const HX_RESWAP: &str = "hx-reswap";

/// Whether the request was issued by htmx.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get(HX_REQUEST).is_some_and(|v| v == "true")
}

/// Extracts whether the request was issued by htmx.
#[derive(Debug, Clone, Copy)]
pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(HxRequest(is_htmx(&parts.headers)))
    }
}

/// Sends the browser to `to`.
///
/// htmx follows a plain redirect inside its XHR and would swap the target
/// page into a fragment slot, so htmx requests get `HX-Redirect` instead.
pub fn redirect(htmx: bool, to: &str) -> Response {
    if htmx {
        (StatusCode::OK, [(HX_REDIRECT, to)]).into_response()
    } else {
        Redirect::to(to).into_response()
    }
}
