//! Integration tests for the HTTP surface.
//!
//! These tests drive the router in-process against an in-memory `SQLite`
//! store, with "today" pinned so expiry classification is deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Request, Response, StatusCode};
use chrono::NaiveDate;
use tower::ServiceExt;

use fridgeledger::{AppState, build_router};
use fridgeledger_core::{
    FridgeId, FridgeService, ItemDraft, ItemId, QuantityLevel, ShoppingDraft, SqliteStore,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

async fn setup() -> (Router, FridgeService) {
    let store = SqliteStore::in_memory().await.unwrap();
    let service = FridgeService::new(Arc::new(store), FridgeId::DEFAULT);
    service.bootstrap().await.unwrap();
    let app = build_router(AppState::new(service.clone()).with_clock(today));
    (app, service)
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn post(app: &Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

fn location(response: &Response<Body>) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[LOCATION].to_str().unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_static_pages() {
    let (app, _) = setup().await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"href="/items""#));

    let response = get(&app, "/share_settings").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cancel_links_ask_before_discarding() {
    let (app, _) = setup().await;

    let html = body_text(get(&app, "/register").await).await;
    assert!(html.contains(r#"<a href="/items" onclick="return confirmCancel()">キャンセル</a>"#));
    assert!(html.contains("function confirmCancel()"));

    let html = body_text(get(&app, "/add_shopping_manual").await).await;
    assert!(html.contains(
        r#"<a href="/shopping_list" onclick="return confirmCancel()">キャンセル</a>"#
    ));
}

#[tokio::test]
async fn test_register_and_list() {
    let (app, service) = setup().await;

    let response = post(
        &app,
        "/register",
        "name=ketchup&container_type=2&quantity_level=&expiry_date=2026-10-18&memo=",
    )
    .await;
    assert_eq!(location(&response), "/items?notice=item_registered");

    let items = service
        .list_items(None, Default::default(), today())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0].item;
    assert_eq!(item.quantity_level, QuantityLevel::Full);
    assert_eq!(item.purchase_date, Some(today()));
    assert_eq!(item.memo, None);

    let html = body_text(get(&app, "/items?notice=item_registered").await).await;
    assert!(html.contains("ketchup"));
    assert!(html.contains("❌"));
    assert!(html.contains("調味料を登録しました"));
    assert!(html.contains("買い物リストへ"));
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, service) = setup().await;

    let response = post(&app, "/register", "name=++&container_type=1").await;
    assert_eq!(location(&response), "/register?notice=invalid_name");

    let response = post(&app, "/register", "name=salt&expiry_date=31-12-2026").await;
    assert_eq!(location(&response), "/register?notice=invalid_form");

    let items = service
        .list_items(None, Default::default(), today())
        .await
        .unwrap();
    assert!(items.is_empty());

    let html = body_text(get(&app, "/register?notice=invalid_name").await).await;
    assert!(html.contains("調味料名は必須です(50文字以内)"));
}

#[tokio::test]
async fn test_update_quantity() {
    let (app, service) = setup().await;
    let item = service
        .register_item(ItemDraft::new("醤油"), today())
        .await
        .unwrap();

    let response = post(&app, &format!("/update_quantity/{}/5", item.id), "").await;
    assert_eq!(location(&response), "/items?notice=invalid_quantity");
    assert_eq!(
        service.item(item.id).await.unwrap().quantity_level,
        QuantityLevel::Full
    );

    let response = post(&app, &format!("/update_quantity/{}/abc", item.id), "").await;
    assert_eq!(location(&response), "/items?notice=invalid_quantity");
    assert_eq!(
        service.item(item.id).await.unwrap().quantity_level,
        QuantityLevel::Full
    );

    let response = post(&app, &format!("/update_quantity/{}/3", item.id), "").await;
    assert_eq!(location(&response), "/items?notice=quantity_updated");
    assert_eq!(
        service.item(item.id).await.unwrap().quantity_level,
        QuantityLevel::Low
    );
}

#[tokio::test]
async fn test_missing_item() {
    let (app, _) = setup().await;

    let response = post(&app, "/delete/99", "").await;
    assert_eq!(location(&response), "/items?notice=item_not_found");

    let response = get(&app, "/edit/99").await;
    assert_eq!(location(&response), "/items?notice=item_not_found");

    let response = post(&app, "/edit/99", "name=vinegar").await;
    assert_eq!(location(&response), "/items?notice=item_not_found");
}

#[tokio::test]
async fn test_edit_item() {
    let (app, service) = setup().await;
    let item = service
        .register_item(ItemDraft::new("マヨネーズ"), today())
        .await
        .unwrap();

    let html = body_text(get(&app, &format!("/edit/{}", item.id)).await).await;
    assert!(html.contains(r#"value="マヨネーズ""#));
    assert!(html.contains(r#"value="2026-10-19""#));

    let response = post(&app, &format!("/edit/{}", item.id), "name=+").await;
    assert_eq!(
        location(&response),
        format!("/edit/{}?notice=invalid_name", item.id)
    );

    let response = post(
        &app,
        &format!("/edit/{}", item.id),
        "name=mayo&quantity_level=2&opened_date=2026-07-01",
    )
    .await;
    assert_eq!(location(&response), "/items?notice=item_updated");

    let updated = service.item(item.id).await.unwrap();
    assert_eq!(updated.name, "mayo");
    assert_eq!(updated.quantity_level, QuantityLevel::Half);
    assert_eq!(updated.purchase_date, None);

    let html = body_text(get(&app, "/items").await).await;
    assert!(html.contains("開封から110日"));

    let response = post(
        &app,
        &format!("/edit/{}", item.id),
        "name=mayo&quantity_level=2&purchase_date=2026-10-01",
    )
    .await;
    assert_eq!(location(&response), "/items?notice=item_updated");
    assert_eq!(
        service.item(item.id).await.unwrap().purchase_date,
        NaiveDate::from_ymd_opt(2026, 10, 1)
    );
}

#[tokio::test]
async fn test_list_sorting_and_escaping() {
    let (app, service) = setup().await;
    let full = ItemDraft::new("<b>full</b>");
    let empty = ItemDraft {
        quantity_level: QuantityLevel::Empty,
        ..ItemDraft::new("empty-one")
    };
    service.register_item(full, today()).await.unwrap();
    service.register_item(empty, today()).await.unwrap();

    let html = body_text(get(&app, "/items?sort=quantity").await).await;
    assert!(html.contains("&lt;b&gt;full&lt;/b&gt;"));
    assert!(!html.contains("<b>full</b>"));
    let empty_at = html.find("empty-one").unwrap();
    let full_at = html.find("&lt;b&gt;full").unwrap();
    assert!(empty_at < full_at);
}

#[tokio::test]
async fn test_category_filter_and_creation() {
    let (app, service) = setup().await;

    let response = post(&app, "/add_category", "name=drinks").await;
    assert_eq!(location(&response), "/items?notice=category_added");

    let response = post(&app, "/add_category", "name=").await;
    assert_eq!(location(&response), "/items?notice=invalid_name");

    let categories = service.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    let drinks = categories[1].id;

    let in_drinks = ItemDraft {
        category_id: drinks,
        ..ItemDraft::new("juice")
    };
    service.register_item(in_drinks, today()).await.unwrap();
    service
        .register_item(ItemDraft::new("pepper"), today())
        .await
        .unwrap();

    let html = body_text(get(&app, &format!("/items?category={drinks}")).await).await;
    assert!(html.contains("juice"));
    assert!(!html.contains("pepper"));
}

#[tokio::test]
async fn test_shopping_flow() {
    let (app, service) = setup().await;
    let item = service
        .register_item(
            ItemDraft {
                memo: Some("large".to_string()),
                ..ItemDraft::new("soy")
            },
            today(),
        )
        .await
        .unwrap();

    let response = post(&app, &format!("/add_to_shopping_list/{}", item.id), "").await;
    assert_eq!(location(&response), "/items?notice=added_to_list");

    let response = post(&app, "/add_shopping_manual", "item_name=sugar&container_type=3").await;
    assert_eq!(location(&response), "/shopping_list?notice=added_to_list");

    let entries = service.shopping_list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].item_name, "soy");
    assert_eq!(entries[0].memo.as_deref(), Some("large"));

    let html = body_text(get(&app, "/shopping_list").await).await;
    assert!(html.contains("soy"));
    assert!(html.contains("sugar"));

    let response = post(&app, &format!("/toggle_shopping_check/{}", entries[1].id), "").await;
    assert_eq!(location(&response), "/shopping_list?notice=shopping_checked");
    assert!(service.shopping_list().await.unwrap()[1].is_checked);

    let html = body_text(get(&app, &format!("/purchase_from_list/{}", entries[0].id)).await).await;
    assert!(html.contains(r#"value="soy""#));

    let response = post(
        &app,
        &format!("/purchase_from_list/{}", entries[0].id),
        "name=soy&container_type=1&quantity_level=1",
    )
    .await;
    assert_eq!(location(&response), "/items?notice=purchased");

    let remaining = service.shopping_list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_checked);

    let response = post(&app, "/finish_shopping", "").await;
    assert_eq!(
        location(&response),
        "/shopping_list?notice=shopping_finished&count=1"
    );
    assert!(service.shopping_list().await.unwrap().is_empty());

    let html = body_text(get(&app, "/shopping_list?notice=shopping_finished&count=1").await).await;
    assert!(html.contains("1件の購入済みアイテムを削除しました"));
}

#[tokio::test]
async fn test_shopping_missing_records() {
    let (app, service) = setup().await;

    let response = post(&app, "/add_to_shopping_list/42", "").await;
    assert_eq!(location(&response), "/items");
    assert!(service.shopping_list().await.unwrap().is_empty());

    let response = get(&app, "/purchase_from_list/42").await;
    assert_eq!(location(&response), "/shopping_list?notice=entry_not_found");

    let response = post(&app, "/purchase_from_list/42", "name=salt").await;
    assert_eq!(location(&response), "/shopping_list?notice=entry_not_found");

    let response = post(&app, "/toggle_shopping_check/42", "").await;
    assert_eq!(location(&response), "/shopping_list?notice=entry_not_found");

    let entry = service
        .add_shopping_manual(&ShoppingDraft::new("oil"))
        .await
        .unwrap();
    let response = post(&app, &format!("/purchase_from_list/{}", entry.id), "name=").await;
    assert_eq!(
        location(&response),
        format!("/purchase_from_list/{}?notice=invalid_name", entry.id)
    );
    assert_eq!(service.shopping_list().await.unwrap().len(), 1);
    assert!(service.item(ItemId(1)).await.is_err());
}
