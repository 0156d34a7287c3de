//! Register, edit, purchase and manual shopping forms.

use std::fmt::Write;

use chrono::NaiveDate;
use fridgeledger_core::{
    Category, ContainerType, Item, ItemDraft, MAX_NAME_CHARS, QuantityLevel, ShoppingListEntry,
};

use super::{escape_html, layout, options};
use crate::form::DATE_FORMAT;
use crate::notice::Notice;

/// Renders the new item form.
pub fn view_register(categories: &[Category], notice: Option<Notice>) -> String {
    let body = item_form(
        "/register",
        &ItemDraft::new(""),
        categories,
        "登録",
        "/items",
    );
    layout("調味料を登録", notice, &format!("<h1>調味料を登録</h1>\n{body}"))
}

/// Renders the edit form prefilled with the item's current values.
pub fn view_edit(item: &Item, categories: &[Category], notice: Option<Notice>) -> String {
    let body = item_form(
        &format!("/edit/{}", item.id),
        &item.to_draft(),
        categories,
        "更新",
        "/items",
    );
    layout("調味料を編集", notice, &format!("<h1>調味料を編集</h1>\n{body}"))
}

/// Renders the form that turns a shopping-list entry into an item.
pub fn view_purchase(
    entry: &ShoppingListEntry,
    categories: &[Category],
    notice: Option<Notice>,
) -> String {
    let body = item_form(
        &format!("/purchase_from_list/{}", entry.id),
        &entry.to_item_draft(),
        categories,
        "購入して登録",
        "/shopping_list",
    );
    layout(
        "購入した調味料を登録",
        notice,
        &format!("<h1>購入した調味料を登録</h1>\n{body}"),
    )
}

/// Renders the manual shopping-list entry form.
pub fn view_shopping_manual(notice: Option<Notice>) -> String {
    let mut body = String::from(
        r#"<h1>買い物リストに追加</h1>
<form method="post" action="/add_shopping_manual">
"#,
    );
    let _ = writeln!(
        body,
        r#"<label>名前 <input type="text" name="item_name" required maxlength="{MAX_NAME_CHARS}"></label>"#
    );
    let _ = writeln!(
        body,
        r#"<label>容器 <select name="container_type">{}</select></label>"#,
        container_options(ContainerType::default())
    );
    body.push_str(
        r#"<label>メモ <input type="text" name="memo"></label>
<button type="submit">追加</button> <a href="/shopping_list" onclick="return confirmCancel()">キャンセル</a>
</form>
"#,
    );
    layout("買い物リストに追加", notice, &body)
}

fn item_form(
    action: &str,
    draft: &ItemDraft,
    categories: &[Category],
    submit_label: &str,
    cancel_to: &str,
) -> String {
    let mut html = String::new();
    let _ = writeln!(html, r#"<form method="post" action="{action}">"#);
    let _ = writeln!(
        html,
        r#"<label>名前 <input type="text" name="name" value="{}" required maxlength="{MAX_NAME_CHARS}"></label>"#,
        escape_html(&draft.name)
    );
    let _ = writeln!(
        html,
        r#"<label>カテゴリ <select name="category_id">{}</select></label>"#,
        options(
            categories.iter().map(|c| (c.id.0, c.name.as_str())),
            draft.category_id.0
        )
    );
    let _ = writeln!(
        html,
        r#"<label>容器 <select name="container_type">{}</select></label>"#,
        container_options(draft.container_type)
    );
    let _ = writeln!(
        html,
        r#"<label>残量 <select name="quantity_level">{}</select></label>"#,
        options(
            QuantityLevel::ALL.iter().map(|q| (q.code(), q.label())),
            draft.quantity_level.code()
        )
    );
    date_input(&mut html, "購入日", "purchase_date", draft.purchase_date);
    date_input(&mut html, "開封日", "opened_date", draft.opened_date);
    date_input(&mut html, "賞味期限", "expiry_date", draft.expiry_date);
    let _ = writeln!(
        html,
        r#"<label>メモ <input type="text" name="memo" value="{}"></label>"#,
        escape_html(draft.memo.as_deref().unwrap_or_default())
    );
    let _ = writeln!(
        html,
        r#"<button type="submit">{submit_label}</button> <a href="{cancel_to}" onclick="return confirmCancel()">キャンセル</a>"#
    );
    html.push_str("</form>\n");
    html
}

fn container_options(selected: ContainerType) -> String {
    options(
        ContainerType::ALL.iter().map(|c| (c.code(), c.label())),
        selected.code(),
    )
}

fn date_input(html: &mut String, label: &str, name: &str, value: Option<NaiveDate>) {
    let value = value
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    let _ = writeln!(
        html,
        r#"<label>{label} <input type="date" name="{name}" value="{value}"></label>"#
    );
}
