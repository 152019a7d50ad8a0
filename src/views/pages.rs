use super::{escape_html, fragments, layout};
use crate::models::{session::Session, todo::TodoItem};

/// The login form, optionally with the error of a failed attempt.
pub fn login_page(email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<article>
<header><h1>Log in</h1></header>
{error}
<form method="post" action="/login">
<label>Email <input type="email" name="email" value="{email}" required autocomplete="email"></label>
<label>Password <input type="password" name="password" required autocomplete="current-password"></label>
<button type="submit">Log in</button>
</form>
<footer>No account yet? <a href="/register">Register</a></footer>
</article>"#,
        error = error.map(fragments::field_error).unwrap_or_default(),
        email = escape_html(email),
    );

    layout("Log in", None, &body)
}

/// The registration form, optionally with the error of a failed attempt.
pub fn register_page(name: &str, email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<article>
<header><h1>Create an account</h1></header>
{error}
<form method="post" action="/register">
<label>Name <input type="text" name="name" value="{name}" required autocomplete="name"></label>
<label>Email <input type="email" name="email" value="{email}" required autocomplete="email"></label>
<label>Password <input type="password" name="password" minlength="8" required autocomplete="new-password"></label>
<button type="submit">Register</button>
</form>
<footer>Already registered? <a href="/login">Log in</a></footer>
</article>"#,
        error = error.map(fragments::field_error).unwrap_or_default(),
        name = escape_html(name),
        email = escape_html(email),
    );

    layout("Register", None, &body)
}

/// The todo list. `banner` replaces the list when loading it failed.
pub fn index_page(session: &Session, items: &[TodoItem], banner: Option<&str>) -> String {
    let body = format!(
        r#"<nav>
<ul><li><strong>Tasklane</strong></li></ul>
<ul><li>{name}</li><li><button class="secondary outline" hx-post="/logout">Log out</button></li></ul>
</nav>
{banner}
{form}
<ul id="items">{items}</ul>"#,
        name = escape_html(session.display_name()),
        banner = banner.map(fragments::error_banner).unwrap_or_default(),
        form = fragments::create_form(),
        items = fragments::item_list(items),
    );

    layout("Todos", Some(session), &body)
}
