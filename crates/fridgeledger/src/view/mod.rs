//! Server-rendered HTML pages.
//!
//! Pages are plain strings built with `write!`; every user-supplied value
//! goes through [`escape_html`] on the way in.

mod forms;
mod items;
mod pages;
mod shopping;

use std::fmt::Write;

pub use forms::{view_edit, view_purchase, view_register, view_shopping_manual};
pub use items::view_items;
pub use pages::{view_fridge_select, view_share_settings};
pub use shopping::view_shopping_list;

use crate::notice::Notice;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const STYLE: &str = r"
body { font-family: sans-serif; margin: 0 auto; max-width: 720px; padding: 1rem; }
nav a { margin-right: 1rem; }
.alert { padding: 0.5rem 1rem; border-radius: 4px; margin: 1rem 0; transition: opacity 0.3s; }
.alert-success { background: #e6f4ea; color: #1e4620; }
.alert-error { background: #fdecea; color: #611a15; }
.text-danger { color: #c62828; }
.text-warning { color: #ef6c00; }
.item { border-bottom: 1px solid #ddd; padding: 0.75rem 0; }
.checked { text-decoration: line-through; color: #888; }
form.inline { display: inline; }
label { display: block; margin-top: 0.5rem; }
";

const SCRIPT: &str = r"
document.addEventListener('DOMContentLoaded', function() {
    document.querySelectorAll('.alert').forEach(function(message) {
        setTimeout(function() {
            message.style.opacity = '0';
            setTimeout(function() { message.remove(); }, 300);
        }, 3000);
    });
});
function confirmDelete() {
    return confirm('本当に削除しますか?');
}
function confirmCancel() {
    const input = document.querySelector('form input[type=text]');
    if (input && input.value.trim() !== '') {
        return confirm('入力内容は破棄されます。よろしいですか?');
    }
    return true;
}
";

/// Wrap a page body in the shared layout.
pub(crate) fn layout(title: &str, notice: Option<Notice>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | 冷蔵庫管理</title>
<style>{STYLE}</style>
<script>{SCRIPT}</script>
</head>
<body>
<nav><a href="/items">調味料一覧</a><a href="/register">登録</a><a href="/shopping_list">買い物リスト</a></nav>
"#,
        title = escape_html(title),
    );
    if let Some(notice) = notice {
        let _ = writeln!(
            html,
            r#"<div class="{}">{}</div>"#,
            notice.level().css_class(),
            escape_html(&notice.message())
        );
    }
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

/// Render `<option>` tags, marking the one equal to `selected`.
pub(crate) fn options<'a>(
    choices: impl IntoIterator<Item = (i64, &'a str)>,
    selected: i64,
) -> String {
    let mut html = String::new();
    for (value, label) in choices {
        let marker = if value == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{value}"{marker}>{}</option>"#,
            escape_html(label)
        );
    }
    html
}
