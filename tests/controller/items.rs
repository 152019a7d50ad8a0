use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockito::Matcher;
use serde_json::json;

use crate::util::{
    SECRET, body_text, fixtures, form, get, location, test_setup,
};

#[tokio::test]
/// Expect the list page to show the user's items
async fn index_lists_items() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = fixtures::mock_list_documents(
        &mut test.server,
        vec![
            fixtures::document("doc-1", "buy milk"),
            fixtures::document("doc-2", "walk the dog"),
        ],
    )
    .await;

    let resp = test.send(get("/", Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"id="item-doc-1""#));
    assert!(body.contains("walk the dog"));
    assert!(body.contains("X-CSRF-Token"));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect a failed fetch to still render the page, with a banner and the backend status
async fn index_shows_banner_when_backend_fails() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _mock = test
        .server
        .mock("GET", fixtures::documents_path().as_str())
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(fixtures::backend_error(500, "general_unknown", "Server Error"))
        .create_async()
        .await;

    let resp = test.send(get("/", Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = body_text(resp).await;
    assert!(body.contains("error-banner"));
    assert!(body.contains(r#"hx-post="/items""#));
    assert!(!body.contains("Server Error"));
}

#[tokio::test]
/// Expect empty content to be rejected without touching the backend
async fn create_with_empty_content_is_rejected() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("POST", fixtures::documents_path().as_str())
        .expect(0)
        .create_async()
        .await;

    let resp = test
        .send(form("POST", "/items", "content=+++", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers().get("hx-reswap").unwrap(), "innerHTML");
    assert!(body_text(resp).await.contains("Content is required"));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect content over the attribute size to be rejected
async fn create_with_oversized_content_is_rejected() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("POST", fixtures::documents_path().as_str())
        .expect(0)
        .create_async()
        .await;

    let body = format!("content={}", "a".repeat(129));
    let resp = test.send(form("POST", "/items", &body, Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("at most 128 characters"));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect a created item to show up in the next listing
async fn created_item_appears_in_listing() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;

    let empty = fixtures::mock_list_documents(&mut test.server, vec![]).await;
    let resp = test.send(get("/items", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "");
    empty.assert_async().await;
    empty.remove_async().await;

    let _attributes = fixtures::mock_attributes(&mut test.server, &["content"]).await;
    let create = fixtures::mock_create_document(&mut test.server, "doc-1", "buy milk").await;

    let resp = test
        .send(form("POST", "/items", "content=++buy+milk+", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let fragment = body_text(resp).await;
    assert!(fragment.starts_with(r#"<li id="item-doc-1""#));
    assert!(fragment.contains("buy milk"));
    create.assert_async().await;

    let _listed = fixtures::mock_list_documents(
        &mut test.server,
        vec![fixtures::document("doc-1", "buy milk")],
    )
    .await;
    let resp = test.send(get("/", Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("buy milk"));
}

#[tokio::test]
/// Expect the created document to be readable and editable only by its owner
async fn created_item_carries_owner_permissions() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _attributes = fixtures::mock_attributes(&mut test.server, &["content"]).await;
    let mock = test
        .server
        .mock("POST", fixtures::documents_path().as_str())
        .match_body(Matcher::PartialJson(json!({
            "permissions": [
                "read(\"user:user-1\")",
                "update(\"user:user-1\")",
                "delete(\"user:user-1\")",
            ]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "buy milk").to_string())
        .create_async()
        .await;

    let resp = test
        .send(form("POST", "/items", "content=buy+milk", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
/// Expect JSON bodies to be accepted as well as forms
async fn create_accepts_json_body() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _attributes = fixtures::mock_attributes(&mut test.server, &["content"]).await;
    let create = fixtures::mock_create_document(&mut test.server, "doc-1", "buy milk").await;

    let req = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/json")
        .header("cookie", session.cookie())
        .header("x-csrf-token", &session.csrf)
        .body(Body::from(r#"{"content":"buy milk"}"#))
        .unwrap();
    let resp = test.send(req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    create.assert_async().await;
}

#[tokio::test]
/// Expect the content attribute to be created once when the collection lacks it
async fn missing_content_attribute_is_created_once() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let attributes = fixtures::mock_attributes(&mut test.server, &[]).await;
    let create_attribute = test
        .server
        .mock(
            "POST",
            format!("{}/attributes/string", fixtures::collection_path()).as_str(),
        )
        .match_header("x-appwrite-key", "test-api-key")
        .match_body(Matcher::Json(json!({
            "key": "content",
            "size": 128,
            "required": true,
        })))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"key":"content","type":"string","status":"processing","size":128}"#)
        .expect(1)
        .create_async()
        .await;
    let create = test
        .server
        .mock("POST", fixtures::documents_path().as_str())
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "buy milk").to_string())
        .expect(2)
        .create_async()
        .await;

    for _ in 0..2 {
        let resp = test
            .send(form("POST", "/items", "content=buy+milk", Some(&session)))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    attributes.assert_async().await;
    create_attribute.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
/// Expect a failed attribute check to be attempted again on the next create
async fn failed_attribute_check_is_retried() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let attributes_path = format!("{}/attributes", fixtures::collection_path());

    let failing = test
        .server
        .mock("GET", attributes_path.as_str())
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(fixtures::backend_error(500, "general_unknown", "Server Error"))
        .expect(1)
        .create_async()
        .await;
    let create = fixtures::mock_create_document(&mut test.server, "doc-1", "buy milk").await;

    let resp = test
        .send(form("POST", "/items", "content=buy+milk", Some(&session)))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    failing.assert_async().await;
    failing.remove_async().await;

    let attributes = fixtures::mock_attributes(&mut test.server, &["content"]).await;

    let resp = test
        .send(form("POST", "/items", "content=buy+milk", Some(&session)))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    attributes.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
/// Expect item text to be escaped in the returned fragment
async fn created_item_content_is_escaped() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _attributes = fixtures::mock_attributes(&mut test.server, &["content"]).await;
    let _create =
        fixtures::mock_create_document(&mut test.server, "doc-1", "<b>bold</b>").await;

    let resp = test
        .send(form(
            "POST",
            "/items",
            "content=%3Cb%3Ebold%3C%2Fb%3E",
            Some(&session),
        ))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let fragment = body_text(resp).await;
    assert!(fragment.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(!fragment.contains("<b>"));
}

#[tokio::test]
/// Expect a mutating request without the CSRF header to be refused
async fn create_without_csrf_token_is_forbidden() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("POST", fixtures::documents_path().as_str())
        .expect(0)
        .create_async()
        .await;

    let req = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("cookie", session.cookie())
        .body(Body::from("content=buy+milk"))
        .unwrap();
    let resp = test.send(req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    mock.assert_async().await;
}

#[tokio::test]
/// Expect a mismatched CSRF token to be refused
async fn create_with_wrong_csrf_token_is_forbidden() {
    let test = test_setup().await;
    let session = test.logged_in().await;

    let req = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("cookie", session.cookie())
        .header("x-csrf-token", "not-the-token")
        .body(Body::from("content=buy+milk"))
        .unwrap();
    let resp = test.send(req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
/// Expect the edit form to be prefilled with the current text
async fn edit_renders_prefilled_form() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _mock = test
        .server
        .mock("GET", fixtures::document_path("doc-1").as_str())
        .match_header("x-appwrite-session", SECRET)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "buy milk").to_string())
        .create_async()
        .await;

    let resp = test.send(get("/items/doc-1/edit", Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"hx-put="/items/doc-1""#));
    assert!(body.contains(r#"value="buy milk""#));
}

#[tokio::test]
/// Expect an update to return the refreshed row
async fn update_returns_updated_row() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("PATCH", fixtures::document_path("doc-1").as_str())
        .match_header("x-appwrite-session", SECRET)
        .match_body(Matcher::PartialJson(json!({ "data": { "content": "oat milk" } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "oat milk").to_string())
        .create_async()
        .await;

    let resp = test
        .send(form("PUT", "/items/doc-1", "content=oat+milk", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"<span class="content">oat milk</span>"#));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect the single-row route to render the read-only row
async fn get_item_renders_row() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("GET", fixtures::document_path("doc-1").as_str())
        .match_header("x-appwrite-session", SECRET)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "buy milk").to_string())
        .create_async()
        .await;

    let resp = test.send(get("/items/doc-1", Some(&session))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.starts_with(r#"<li id="item-doc-1""#));
    assert!(body.contains(r#"<span class="content">buy milk</span>"#));
    assert!(!body.contains("hx-put"));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect updates to accept JSON bodies as well as forms
async fn update_accepts_json_body() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("PATCH", fixtures::document_path("doc-1").as_str())
        .match_body(Matcher::PartialJson(json!({ "data": { "content": "oat milk" } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::document("doc-1", "oat milk").to_string())
        .create_async()
        .await;

    let req = Request::builder()
        .method("PUT")
        .uri("/items/doc-1")
        .header("content-type", "application/json")
        .header("cookie", session.cookie())
        .header("x-csrf-token", &session.csrf)
        .body(Body::from(r#"{"content":" oat milk "}"#))
        .unwrap();
    let resp = test.send(req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("oat milk"));
    mock.assert_async().await;
}

#[tokio::test]
/// Expect an update with empty content to be rejected
async fn update_with_empty_content_is_rejected() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("PATCH", fixtures::document_path("doc-1").as_str())
        .expect(0)
        .create_async()
        .await;

    let resp = test
        .send(form("PUT", "/items/doc-1", "content=", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    mock.assert_async().await;
}

#[tokio::test]
/// Expect a delete to answer with an empty body
async fn delete_returns_empty_body() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("DELETE", fixtures::document_path("doc-1").as_str())
        .match_header("x-appwrite-session", SECRET)
        .with_status(204)
        .create_async()
        .await;

    let resp = test
        .send(form("DELETE", "/items/doc-1", "", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "");
    mock.assert_async().await;
}

#[tokio::test]
/// Expect deleting an unknown item to report 404
async fn delete_unknown_item_is_not_found() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _mock = test
        .server
        .mock("DELETE", fixtures::document_path("doc-9").as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(fixtures::backend_error(
            404,
            "document_not_found",
            "Document with the requested ID could not be found.",
        ))
        .create_async()
        .await;

    let resp = test
        .send(form("DELETE", "/items/doc-9", "", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("hx-reswap").unwrap(), "innerHTML");
}

#[tokio::test]
/// Expect ids outside the backend's alphabet to be refused locally
async fn malformed_item_id_is_not_found() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let mock = test
        .server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let resp = test
        .send(form("DELETE", "/items/bad%24id", "", Some(&session)))
        .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    mock.assert_async().await;
}

#[tokio::test]
/// Expect a session the backend no longer honours to be dropped
async fn rejected_backend_session_logs_out() {
    let mut test = test_setup().await;
    let session = test.logged_in().await;
    let _mock = test
        .server
        .mock("GET", fixtures::documents_path().as_str())
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(fixtures::backend_error(
            401,
            "user_unauthorized",
            "The current user is not authorized to perform the requested action.",
        ))
        .create_async()
        .await;

    let req = Request::builder()
        .uri("/items")
        .header("cookie", session.cookie())
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let resp = test.send(req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("hx-redirect").unwrap(), "/login");
    assert!(test.state.sessions.load(session.id).await.unwrap().is_none());

    let resp = test.send(get("/", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}
