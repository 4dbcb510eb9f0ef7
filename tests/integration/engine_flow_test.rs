// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_engine, detail_page, item_html, mount_detail, spawn_app};
use annotrs::application::activate;
use annotrs::domain::models::outcome::CycleOutcome;
use annotrs::domain::ports::session_store::SessionStore;
use annotrs::domain::ports::tree::TreeQueryPort;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_listing_annotated_with_detail_value() {
    let app = spawn_app("/property-for-sale/edinburgh", &item_html("/property-for-sale/123")).await;
    mount_detail(&app.server, "/property-for-sale/123", detail_page("75 m²"), 1).await;

    let handle = activate(&app.engine, &app.document).unwrap().unwrap();
    let summary = handle.shutdown().await;

    assert_eq!(summary.populated, 1);
    assert_eq!(app.annotations(), vec!["75 m²".to_string()]);

    let facilities = app
        .document
        .find_all_with_class(app.document.root(), "facilities")[0];
    let html = app.document.inner_html(facilities);
    assert!(html.ends_with(
        r#"<span class="opt added-floor-area">75 m²<span class="icon-floor_area" style="margin-left:8px"></span></span>"#
    ));
    assert_eq!(
        app.store.get("floorarea-/property-for-sale/123").as_deref(),
        Some("75 m²")
    );
}

#[tokio::test]
async fn test_duplicate_listings_fetch_detail_once() {
    let content = format!(
        "{}{}",
        item_html("/property-for-sale/123"),
        item_html("/property-for-sale/123")
    );
    let app = spawn_app("/property-for-sale", &content).await;
    mount_detail(&app.server, "/property-for-sale/123", detail_page("75 m²"), 1).await;

    let summary = activate(&app.engine, &app.document)
        .unwrap()
        .unwrap()
        .shutdown()
        .await;

    // The second copy is skipped while the first holds the key
    assert_eq!(summary.populated, 1);
    assert_eq!(summary.skipped_locked, 1);
    assert_eq!(app.annotations().len(), 1);

    // Rediscovery once the lock is gone is served from the session cache
    let second = app.engine.scan(app.document.root())[1];
    assert_eq!(app.engine.run_cycle(second).await, CycleOutcome::Populated);
    assert_eq!(app.annotations(), vec!["75 m²".to_string(); 2]);
}

#[tokio::test]
async fn test_detail_without_field_uses_fallback() {
    let app = spawn_app("/new", &item_html("/new/plot-4")).await;
    mount_detail(
        &app.server,
        "/new/plot-4",
        "<html><body><strong>Garden</strong></body></html>".to_string(),
        1,
    )
    .await;

    let item = app.engine.scan(app.document.root())[0];
    assert_eq!(app.engine.run_cycle(item).await, CycleOutcome::Populated);
    assert_eq!(app.annotations(), vec!["N/A".to_string()]);
}

#[tokio::test]
async fn test_error_status_page_still_resolves() {
    let app = spawn_app("/houses-for-sale", &item_html("/houses-for-sale/9")).await;
    Mock::given(method("GET"))
        .and(path("/houses-for-sale/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html><body>Gone</body></html>"))
        .expect(1)
        .mount(&app.server)
        .await;

    let item = app.engine.scan(app.document.root())[0];
    assert_eq!(app.engine.run_cycle(item).await, CycleOutcome::Populated);
    assert_eq!(app.annotations(), vec!["N/A".to_string()]);
}

#[tokio::test]
async fn test_unreachable_origin_leaves_item_untouched() {
    // Nothing listens on port 1, so every request fails at the transport level
    let (document, engine, store) =
        build_engine("http://127.0.0.1:1", "/flats-for-sale", &item_html("/flats-for-sale/2"));
    let item = engine.scan(document.root())[0];
    let before = document.outer_html(item);

    assert_eq!(engine.run_cycle(item).await, CycleOutcome::Failed);
    assert_eq!(document.outer_html(item), before);
    assert!(engine.locks().is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_items_inserted_later_are_annotated() {
    let app = spawn_app("/properties", "").await;
    mount_detail(&app.server, "/properties/1", detail_page("60 m²"), 1).await;
    mount_detail(&app.server, "/properties/2", detail_page("80 m²"), 1).await;
    mount_detail(&app.server, "/properties/3", detail_page("95 m²"), 1).await;

    let handle = activate(&app.engine, &app.document).unwrap().unwrap();
    tokio::task::yield_now().await;

    let content = app.engine.container().unwrap();
    app.document.append_html(
        content,
        &format!(
            r#"<div class="page-2">{}{}{}</div>"#,
            item_html("/properties/1"),
            item_html("/properties/2"),
            item_html("/properties/3")
        ),
    );

    let summary = handle.shutdown().await;
    assert_eq!(summary.populated, 3);

    let mut values = app.annotations();
    values.sort();
    assert_eq!(values, vec!["60 m²", "80 m²", "95 m²"]);
}
