//! Server-rendered HTML.
//!
//! Full pages come from [`pages`], the pieces htmx swaps into them from
//! [`fragments`]. Every value that originates from a user or from the backend
//! goes through [`escape_html`] before it is written out.

pub mod fragments;
pub mod pages;

use crate::models::session::Session;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";
const HTMX_RESPONSE_TARGETS_SRC: &str = "https://unpkg.com/htmx-ext-response-targets@2.0.2";
const PICO_CSS_HREF: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";

const STYLE: &str = r#"
#items:empty::before { content: "Nothing to do yet."; color: var(--pico-muted-color); }
.todo-item { display: flex; gap: 0.5rem; align-items: center; }
.todo-item .content { flex: 1; }
.field-error { color: var(--pico-del-color); margin: 0.25rem 0; }
.error-banner { padding: 0.75rem 1rem; border-radius: var(--pico-border-radius); background: var(--pico-del-color); color: #fff; }
"#;

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps `body` in the document shell.
///
/// With a session, every htmx request carries the session's CSRF token.
pub(crate) fn layout(title: &str, session: Option<&Session>, body: &str) -> String {
    let hx_headers = session
        .map(|s| {
            let headers = format!(r#"{{"X-CSRF-Token":"{}"}}"#, s.csrf_token);
            format!(r#" hx-headers="{}""#, escape_html(&headers))
        })
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Tasklane</title>
<link rel="stylesheet" href="{pico}">
<script src="{htmx}"></script>
<script src="{targets}"></script>
<style>{style}</style>
</head>
<body hx-ext="response-targets" hx-target-error="#banner"{hx_headers}>
<main class="container">
<div id="banner"></div>
{body}
</main>
</body>
</html>
"##,
        title = escape_html(title),
        pico = PICO_CSS_HREF,
        htmx = HTMX_SRC,
        targets = HTMX_RESPONSE_TARGETS_SRC,
        style = STYLE,
        hx_headers = hx_headers,
        body = body,
    )
}
