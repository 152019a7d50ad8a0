use super::escape_html;
use crate::models::todo::{CONTENT_MAX_CHARS, TodoItem};

/// One row of the todo list.
pub fn item(item: &TodoItem) -> String {
    let id = escape_html(&item.id);
    format!(
        r#"<li id="item-{id}" class="todo-item">
<span class="content">{content}</span>
<button class="secondary outline" hx-get="/items/{id}/edit" hx-target="closest li" hx-swap="outerHTML">Edit</button>
<button class="contrast outline" hx-delete="/items/{id}" hx-target="closest li" hx-swap="outerHTML" hx-confirm="Delete this item?">Delete</button>
</li>"#,
        id = id,
        content = escape_html(&item.content),
    )
}

/// Every row, in backend order.
pub fn item_list(items: &[TodoItem]) -> String {
    items.iter().map(item).collect::<Vec<_>>().join("\n")
}

/// A row swapped into edit mode.
pub fn edit_form(item: &TodoItem) -> String {
    let id = escape_html(&item.id);
    format!(
        r#"<li id="item-{id}" class="todo-item">
<form hx-put="/items/{id}" hx-target="closest li" hx-swap="outerHTML" hx-target-error="find .field-errors" role="group">
<input name="content" value="{content}" maxlength="{max}" required autocomplete="off" aria-label="Item text">
<button type="submit">Save</button>
<button type="button" class="secondary" hx-get="/items/{id}" hx-target="closest li" hx-swap="outerHTML">Cancel</button>
<div class="field-errors"></div>
</form>
</li>"#,
        id = id,
        content = escape_html(&item.content),
        max = CONTENT_MAX_CHARS,
    )
}

/// The form that appends new rows to `#items`.
pub fn create_form() -> String {
    format!(
        r##"<form hx-post="/items" hx-target="#items" hx-swap="beforeend" hx-target-error="#form-errors" hx-on::after-request="if (event.detail.successful) {{ this.reset(); document.getElementById('form-errors').innerHTML = ''; }}" role="group">
<input name="content" placeholder="What needs doing?" maxlength="{max}" required autocomplete="off" aria-label="New item">
<button type="submit">Add</button>
</form>
<div id="form-errors"></div>"##,
        max = CONTENT_MAX_CHARS,
    )
}

/// An inline validation message, shown next to the offending input.
pub fn field_error(message: &str) -> String {
    format!(
        r#"<p class="field-error" role="alert">{}</p>"#,
        escape_html(message)
    )
}

/// A page-level failure message.
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="error-banner" role="alert">{}</div>"#,
        escape_html(message)
    )
}
