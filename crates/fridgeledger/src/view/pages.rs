//! Static pages.

use super::layout;

/// Renders the landing page. Only one fridge exists for now.
pub fn view_fridge_select() -> String {
    layout(
        "冷蔵庫を選択",
        None,
        r#"<h1>冷蔵庫を選択</h1>
<ul><li><a href="/items">我が家の冷蔵庫</a></li></ul>
"#,
    )
}

/// Renders the sharing settings placeholder.
pub fn view_share_settings() -> String {
    layout(
        "共有設定",
        None,
        r#"<h1>共有設定</h1>
<p>冷蔵庫の共有は準備中です。</p>
<p><a href="/items">戻る</a></p>
"#,
    )
}
