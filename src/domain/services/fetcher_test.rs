// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::Fetcher;
use crate::domain::models::item::ItemKey;
use crate::domain::ports::session_store::SessionStore;
use crate::engines::extractor::FieldExtractor;
use crate::engines::traits::{FetchError, PageResponse, PageSource};
use crate::infrastructure::cache::memory_store::MemorySessionStore;
use crate::infrastructure::cache::session_cache::SessionCache;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// 返回可变页面内容并记录请求地址的来源
struct ScriptedSource {
    body: Mutex<String>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedSource {
    fn new(body: &str) -> Self {
        Self {
            body: Mutex::new(body.to_string()),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, url: &Url) -> Result<PageResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        if self.fail {
            return Err(FetchError::Other("connection reset".to_string()));
        }
        Ok(PageResponse {
            status_code: 200,
            body: self.body.lock().clone(),
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn page(area: &str) -> String {
    format!(
        r#"<html><body><span class="icon-floor_area"></span><strong>{}</strong></body></html>"#,
        area
    )
}

fn fetcher(source: Arc<ScriptedSource>, store: Arc<MemorySessionStore>) -> Fetcher {
    Fetcher::new(
        source,
        SessionCache::new(store, "floorarea-"),
        FieldExtractor::new(".icon-floor_area + strong", "N/A").unwrap(),
        Url::parse("https://espc.com/property-for-sale?page=3").unwrap(),
    )
}

#[tokio::test]
async fn test_resolve_fetches_and_caches() {
    let source = Arc::new(ScriptedSource::new(&page("75 m²")));
    let store = Arc::new(MemorySessionStore::new());
    let fetcher = fetcher(source.clone(), store.clone());
    let key = ItemKey::from("/property-for-sale/123");

    assert_eq!(fetcher.resolve(&key).await.unwrap(), "75 m²");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        source.urls.lock().as_slice(),
        ["https://espc.com/property-for-sale/123".to_string()]
    );
    assert_eq!(
        store.get("floorarea-/property-for-sale/123").as_deref(),
        Some("75 m²")
    );
}

#[tokio::test]
async fn test_cache_hit_skips_network_even_if_page_changed() {
    let source = Arc::new(ScriptedSource::new(&page("75 m²")));
    let fetcher = fetcher(source.clone(), Arc::new(MemorySessionStore::new()));
    let key = ItemKey::from("/property-for-sale/123");

    fetcher.resolve(&key).await.unwrap();
    *source.body.lock() = page("99 m²");

    assert_eq!(fetcher.resolve(&key).await.unwrap(), "75 m²");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_field_resolves_to_fallback_and_is_cached() {
    let source = Arc::new(ScriptedSource::new("<html><body>No facts</body></html>"));
    let store = Arc::new(MemorySessionStore::new());
    let fetcher = fetcher(source.clone(), store.clone());
    let key = ItemKey::from("/property-for-sale/5");

    assert_eq!(fetcher.resolve(&key).await.unwrap(), "N/A");
    assert_eq!(store.get("floorarea-/property-for-sale/5").as_deref(), Some("N/A"));

    *source.body.lock() = page("50 m²");
    assert_eq!(fetcher.resolve(&key).await.unwrap(), "N/A");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_network_failure_is_not_cached() {
    let source = Arc::new(ScriptedSource::failing());
    let store = Arc::new(MemorySessionStore::new());
    let fetcher = fetcher(source.clone(), store.clone());
    let key = ItemKey::from("/property-for-sale/8");

    assert!(fetcher.resolve(&key).await.is_err());
    assert!(fetcher.resolve(&key).await.is_err());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_first_cached_value_wins() {
    let source = Arc::new(ScriptedSource::new(&page("75 m²")));
    let store = Arc::new(MemorySessionStore::new());
    store.put_if_absent("floorarea-/property-for-sale/1", "10 m²".to_string());
    let fetcher = fetcher(source.clone(), store);

    assert_eq!(
        fetcher
            .resolve(&ItemKey::from("/property-for-sale/1"))
            .await
            .unwrap(),
        "10 m²"
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}
