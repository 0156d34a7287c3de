//! Shopping list page.

use std::fmt::Write;

use fridgeledger_core::ShoppingListEntry;

use super::{escape_html, layout};
use crate::notice::Notice;

/// Renders the shopping list, oldest entry first.
pub fn view_shopping_list(entries: &[ShoppingListEntry], notice: Option<Notice>) -> String {
    let mut body = String::from(
        r#"<h1>買い物リスト</h1>
<p><a href="/add_shopping_manual">手動で追加</a></p>
"#,
    );

    if entries.is_empty() {
        body.push_str("<p>買い物リストは空です。</p>\n");
    }

    for entry in entries {
        let class = if entry.is_checked { "item checked" } else { "item" };
        let mark = if entry.is_checked { "☑" } else { "☐" };
        let _ = write!(
            body,
            r#"<div class="{class}" id="entry-{id}"><form method="post" action="/toggle_shopping_check/{id}" class="inline"><button type="submit">{mark}</button></form> {name} ({container})"#,
            id = entry.id,
            name = escape_html(&entry.item_name),
            container = entry.container_type.label(),
        );
        if let Some(memo) = &entry.memo {
            let _ = write!(body, " <small>{}</small>", escape_html(memo));
        }
        let _ = writeln!(
            body,
            r#" <a href="/purchase_from_list/{}">購入して登録</a></div>"#,
            entry.id
        );
    }

    if entries.iter().any(|e| e.is_checked) {
        body.push_str(
            r#"<form method="post" action="/finish_shopping"><button type="submit">買い物完了</button></form>
"#,
        );
    }

    layout("買い物リスト", notice, &body)
}
