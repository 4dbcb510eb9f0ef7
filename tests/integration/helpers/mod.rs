// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use annotrs::application::Engine;
use annotrs::config::settings::Settings;
use annotrs::domain::ports::tree::TreeQueryPort;
use annotrs::engines::reqwest_engine::ReqwestPageSource;
use annotrs::infrastructure::cache::memory_store::MemorySessionStore;
use annotrs::infrastructure::dom::Document;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MARKER_HEADER: &str = "espc-floor-area-extension";

pub struct TestApp {
    pub server: MockServer,
    pub document: Document,
    pub engine: Engine,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    pub fn annotations(&self) -> Vec<String> {
        self.document
            .find_all_with_class(self.document.root(), "added-floor-area")
            .into_iter()
            .map(|node| self.document.text_content(node))
            .collect()
    }
}

pub fn item_html(href: &str) -> String {
    format!(
        r#"<div class="propertyWrap"><div class="infoWrap"><a href="{}">Flat</a></div><div class="facilities"><span class="opt">2 beds</span></div></div>"#,
        href
    )
}

pub fn detail_page(area: &str) -> String {
    format!(
        r#"<html><body><ul class="facts"><li><span class="icon-floor_area"></span><strong>{}</strong></li></ul></body></html>"#,
        area
    )
}

/// 注册一个详情页，并断言它恰好被请求 `times` 次
pub async fn mount_detail(server: &MockServer, detail_path: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .and(header(MARKER_HEADER, "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

/// 在模拟服务器的源地址下创建列表页文档和引擎
pub async fn spawn_app(listing_path: &str, content: &str) -> TestApp {
    let server = MockServer::start().await;
    let (document, engine, store) = build_engine(&server.uri(), listing_path, content);

    TestApp {
        server,
        document,
        engine,
        store,
    }
}

/// 在任意源地址下创建列表页文档和引擎
pub fn build_engine(
    origin: &str,
    listing_path: &str,
    content: &str,
) -> (Document, Engine, Arc<MemorySessionStore>) {
    let mut settings = Settings::with_defaults().expect("default settings");
    settings.fetch.origin = origin.to_string();
    settings.fetch.timeout_secs = Some(5);

    let page_url = Url::parse(origin)
        .and_then(|origin| origin.join(listing_path))
        .expect("listing url");
    let document = Document::parse(
        &format!(
            r#"<html><body><div id="content">{}</div></body></html>"#,
            content
        ),
        page_url,
    );

    let store = Arc::new(MemorySessionStore::new());
    let source = Arc::new(ReqwestPageSource::new(&settings.fetch).expect("page source"));
    let engine = Engine::new(&settings, Arc::new(document.clone()), source, store.clone())
        .expect("engine");

    (document, engine, store)
}
