// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::annotation_engine::Engine;
use crate::infrastructure::dom::Document;
use crate::utils::errors::AnnotateError;
use crate::workers::feed_worker::{EngineHandle, FeedWorker};
use tracing::{debug, info, warn};

/// 在文档上激活引擎
///
/// 文档路径不在激活前缀内时不做任何事。否则先订阅被监听容器的变更流，
/// 再由工作器做首次全量扫描，保证两者之间的插入不会丢失。
/// 找不到容器时首次扫描照常进行，其中的周期在后台完成，随后返回错误
///
/// # 返回值
///
/// * `Ok(Some(EngineHandle))` - 已激活
/// * `Ok(None)` - 当前页面无需处理
/// * `Err(AnnotateError::ContainerMissing)` - 找不到被监听的容器，只执行了首次扫描
pub fn activate(engine: &Engine, document: &Document) -> Result<Option<EngineHandle>, AnnotateError> {
    if !engine.should_activate() {
        debug!("No action required for {}", document.url().path());
        return Ok(None);
    }

    let worker = FeedWorker::new(engine.clone());
    let container = match engine.container() {
        Ok(container) => container,
        Err(e) => {
            warn!("{}; annotating the initial scan only", e);
            // The scan-only worker finishes its cycles on its own
            drop(worker.spawn(None));
            return Err(e);
        }
    };

    let feed = document.observe(container);
    info!("Annotating listings on {}", document.url());

    Ok(Some(worker.spawn(Some(feed))))
}
