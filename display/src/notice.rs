//! Inline error notices rendered into page containers.

/// Markup placed into a container when a page script reports a failure.
pub fn error_markup(message: &str) -> String {
    format!(
        r#"<div class="error-message">错误: {}</div>"#,
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
