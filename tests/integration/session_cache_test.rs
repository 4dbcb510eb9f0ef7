// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{detail_page, item_html, mount_detail, spawn_app};
use annotrs::domain::models::item::ItemKey;
use annotrs::domain::models::outcome::CycleOutcome;
use annotrs::domain::ports::session_store::SessionStore;
use annotrs::domain::ports::tree::TreeQueryPort;

#[tokio::test]
async fn test_preseeded_cache_skips_network() {
    let app = spawn_app("/property-for-sale", &item_html("/property-for-sale/77")).await;
    mount_detail(&app.server, "/property-for-sale/77", detail_page("99 m²"), 0).await;
    app.store
        .put_if_absent("floorarea-/property-for-sale/77", "120 m²".to_string());

    let item = app.engine.scan(app.document.root())[0];
    assert_eq!(app.engine.run_cycle(item).await, CycleOutcome::Populated);
    assert_eq!(app.annotations(), vec!["120 m²".to_string()]);
}

#[tokio::test]
async fn test_cached_value_survives_detail_change() {
    let app = spawn_app("/property-for-sale", &item_html("/property-for-sale/5")).await;
    mount_detail(&app.server, "/property-for-sale/5", detail_page("75 m²"), 1).await;

    let item = app.engine.scan(app.document.root())[0];
    assert_eq!(app.engine.run_cycle(item).await, CycleOutcome::Populated);

    // The host re-renders the listing; the value comes from the session
    let fresh = app
        .document
        .replace_with_html(item, &item_html("/property-for-sale/5"))[0];
    assert_eq!(app.engine.run_cycle(fresh).await, CycleOutcome::Populated);

    assert_eq!(
        app.engine.cached(&ItemKey::from("/property-for-sale/5")).as_deref(),
        Some("75 m²")
    );
    assert_eq!(app.store.len(), 1);
}
