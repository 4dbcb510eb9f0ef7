// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use annotrs::application::{activate, Engine};
use annotrs::config::settings::Settings;
use annotrs::engines::reqwest_engine::ReqwestPageSource;
use annotrs::engines::traits::PageSource;
use annotrs::infrastructure::cache::memory_store::MemorySessionStore;
use annotrs::infrastructure::dom::Document;
use annotrs::utils::telemetry;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// 主函数
///
/// 加载一个列表页，在其上运行一次注释会话，并把注释后的列表容器输出到标准输出
///
/// 用法：`annotrs [listing-path]`
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting annotrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.session.start_path.clone());
    let page_url = Url::parse(&settings.fetch.origin)
        .and_then(|origin| origin.join(&path))
        .with_context(|| format!("Invalid listing path: {}", path))?;

    // 3. Load the listing page
    let source = Arc::new(ReqwestPageSource::new(&settings.fetch)?);
    let response = source
        .fetch(&page_url)
        .await
        .with_context(|| format!("Failed to load {}", page_url))?;
    let document = Document::parse(&response.body, page_url);
    info!("Listing page loaded ({} bytes)", response.body.len());

    // 4. Run one annotation session
    let engine = Engine::new(
        &settings,
        Arc::new(document.clone()),
        source,
        Arc::new(MemorySessionStore::new()),
    )?;

    let Some(handle) = activate(&engine, &document)? else {
        info!("Page is outside the annotated sections, nothing to do");
        return Ok(());
    };
    let summary = handle.shutdown().await;
    info!(
        "Session complete: {} cycles, {} populated",
        summary.total(),
        summary.populated
    );

    let container = engine.container()?;
    println!("{}", document.outer_html(container));

    Ok(())
}
