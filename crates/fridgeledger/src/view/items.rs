//! Item list page.

use std::fmt::Write;

use fridgeledger_core::{
    Category, CategoryId, ListedItem, OpenedSeverity, QuantityLevel, SortMode,
};

use super::{escape_html, layout};
use crate::form::DATE_FORMAT;
use crate::notice::Notice;

/// Renders the item list with sort links, category filter and per-item actions.
pub fn view_items(
    items: &[ListedItem],
    categories: &[Category],
    sort: SortMode,
    category: Option<CategoryId>,
    notice: Option<Notice>,
) -> String {
    let mut body = String::from("<h1>調味料一覧</h1>\n");

    let category_param = category.map(|c| format!("&category={c}")).unwrap_or_default();
    let _ = writeln!(
        body,
        r#"<p class="sort">並び順: {} / {}</p>"#,
        sort_link(SortMode::Expiry, "期限順", sort, &category_param),
        sort_link(SortMode::Quantity, "残量順", sort, &category_param),
    );

    body.push_str(r#"<p class="categories"><a href="/items">すべて</a>"#);
    for c in categories {
        let marker = if Some(c.id) == category { " <strong>" } else { " " };
        let _ = write!(
            body,
            r#"{marker}<a href="/items?category={}&sort={}">{}</a>"#,
            c.id,
            sort.as_str(),
            escape_html(&c.name)
        );
        if Some(c.id) == category {
            body.push_str("</strong>");
        }
    }
    body.push_str("</p>\n");
    body.push_str(
        r#"<form method="post" action="/add_category" class="inline"><input type="text" name="name" maxlength="50" placeholder="新しいカテゴリ"> <button type="submit">追加</button></form>
"#,
    );

    if items.is_empty() {
        body.push_str("<p>登録されている調味料はありません。</p>\n");
    }

    for listed in items {
        render_item(&mut body, listed);
    }

    layout("調味料一覧", notice, &body)
}

fn sort_link(mode: SortMode, label: &str, current: SortMode, category_param: &str) -> String {
    if mode == current {
        format!("<strong>{label}</strong>")
    } else {
        format!(
            r#"<a href="/items?sort={}{category_param}">{label}</a>"#,
            mode.as_str()
        )
    }
}

fn render_item(body: &mut String, listed: &ListedItem) {
    let item = &listed.item;
    let status = &listed.status;

    let _ = writeln!(
        body,
        r#"<div class="item" id="item-{}"><h2>{}</h2><p>{} / 残量: {}</p>"#,
        item.id,
        escape_html(&item.name),
        item.container_type.label(),
        item.quantity_level.label(),
    );

    if let Some(expiry) = item.expiry_date {
        let _ = writeln!(
            body,
            r#"<p class="{}">{} 賞味期限: {}</p>"#,
            status.expiry.css_class(),
            status.expiry.icon(),
            expiry.format(DATE_FORMAT)
        );
    }

    if let Some(opened) = status.opened {
        let class = match opened.severity {
            OpenedSeverity::Danger => "text-danger",
            OpenedSeverity::Warning => "text-warning",
            OpenedSeverity::Normal => "",
        };
        let _ = writeln!(body, r#"<p class="{class}">開封から{}日</p>"#, opened.days);
    }

    if let Some(memo) = &item.memo {
        let _ = writeln!(body, "<p>{}</p>", escape_html(memo));
    }

    body.push_str("<p>");
    for level in QuantityLevel::ALL {
        let disabled = if level == item.quantity_level { " disabled" } else { "" };
        let _ = write!(
            body,
            r#"<form method="post" action="/update_quantity/{}/{}" class="inline"><button type="submit"{disabled}>{}</button></form> "#,
            item.id,
            level.code(),
            level.label()
        );
    }
    body.push_str("</p>\n<p>");

    let _ = write!(body, r#"<a href="/edit/{}">編集</a> "#, item.id);
    let _ = write!(
        body,
        r#"<form method="post" action="/delete/{}" class="inline" onsubmit="return confirmDelete()"><button type="submit">削除</button></form> "#,
        item.id
    );
    if status.show_add_to_list {
        let _ = write!(
            body,
            r#"<form method="post" action="/add_to_shopping_list/{}" class="inline"><button type="submit">買い物リストへ</button></form>"#,
            item.id
        );
    }
    body.push_str("</p></div>\n");
}
