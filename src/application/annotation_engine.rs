// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::item::ItemKey;
use crate::domain::models::markers::Markers;
use crate::domain::models::outcome::CycleOutcome;
use crate::domain::ports::session_store::SessionStore;
use crate::domain::ports::tree::{NodeId, TreePort, TreeQueryPort};
use crate::domain::services::annotator::{Annotator, Finalized};
use crate::domain::services::fetcher::Fetcher;
use crate::domain::services::lock_manager::LockManager;
use crate::domain::services::reconciler::Reconciler;
use crate::domain::services::scanner::Scanner;
use crate::engines::extractor::FieldExtractor;
use crate::engines::traits::PageSource;
use crate::infrastructure::cache::session_cache::SessionCache;
use crate::utils::errors::AnnotateError;
use crate::utils::url_utils::path_allowed;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, warn};

struct EngineInner {
    tree: Arc<dyn TreePort>,
    scanner: Scanner,
    locks: LockManager,
    annotator: Annotator,
    reconciler: Reconciler,
    fetcher: Fetcher,
    allowed_paths: Vec<String>,
    container_id: String,
}

/// 注释引擎
///
/// 组合根：持有会话缓存和锁集合，驱动每个列表项的注释周期。
/// 克隆得到的是同一个引擎实例的句柄，不同实例之间不共享任何状态
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    /// 创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 应用程序配置
    /// * `tree` - 文档树
    /// * `source` - 详情页来源
    /// * `store` - 会话存储，生命周期即会话生命周期
    ///
    /// # 返回值
    ///
    /// * `Ok(Engine)` - 创建成功
    /// * `Err(AnnotateError)` - 选择器或源地址无效
    pub fn new(
        settings: &Settings,
        tree: Arc<dyn TreePort>,
        source: Arc<dyn PageSource>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, AnnotateError> {
        let markers = Markers::from(&settings.selectors);
        let scanner = Scanner::new(markers.clone());
        let extractor = FieldExtractor::new(
            &settings.selectors.value_selector,
            settings.cache.fallback_value.clone(),
        )?;
        // Keys resolve against the host origin, never the listing path
        let origin = tree.base_url().join("/")?;
        let fetcher = Fetcher::new(
            source,
            SessionCache::new(store, settings.cache.key_prefix.clone()),
            extractor,
            origin,
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                tree,
                reconciler: Reconciler::new(scanner.clone()),
                scanner,
                locks: LockManager::new(),
                annotator: Annotator::new(markers),
                fetcher,
                allowed_paths: settings.engine.allowed_paths.clone(),
                container_id: settings.engine.container_id.clone(),
            }),
        })
    }

    /// 文档路径是否命中激活前缀
    pub fn should_activate(&self) -> bool {
        let url = self.inner.tree.base_url();
        path_allowed(url.path(), &self.inner.allowed_paths)
    }

    /// 被监听的容器元素
    pub fn container(&self) -> Result<NodeId, AnnotateError> {
        self.inner
            .tree
            .element_by_id(&self.inner.container_id)
            .ok_or_else(|| AnnotateError::ContainerMissing(self.inner.container_id.clone()))
    }

    /// 查找子树中的列表项
    pub fn scan(&self, root: NodeId) -> Vec<NodeId> {
        self.inner.scanner.find_items(self.inner.tree.as_ref(), root)
    }

    /// 对单个列表项执行完整的注释周期
    ///
    /// 检查注释、获取键、加锁和插入占位都在第一个挂起点之前同步完成；
    /// 锁在所有退出路径上释放
    pub async fn run_cycle(&self, node: NodeId) -> CycleOutcome {
        let outcome = self.cycle(node).await;
        counter!("annotrs_cycles_total", "outcome" => outcome.as_str()).increment(1);
        outcome
    }

    async fn cycle(&self, node: NodeId) -> CycleOutcome {
        let inner = &self.inner;
        let tree = inner.tree.as_ref();

        let item = inner.scanner.item(tree, node);
        if inner.annotator.has_annotation(tree, &item) {
            return CycleOutcome::AlreadyDone;
        }

        let Some(key) = item.key.clone() else {
            debug!("No url found on item {:?}", node);
            return CycleOutcome::MissingKey;
        };

        let Some(lock) = inner.locks.try_acquire(&key) else {
            debug!("{} is already being annotated", key);
            return CycleOutcome::SkippedLocked;
        };

        let Some(handle) = inner.annotator.insert_pending(tree, &item) else {
            debug!("Item {} has no facilities container", key);
            return CycleOutcome::NoFacilities;
        };

        let value = match inner.fetcher.resolve(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to resolve {}: {}", key, e);
                inner.annotator.discard(tree, &handle);
                return CycleOutcome::Failed;
            }
        };

        let Some(current) = inner.reconciler.relocate(tree, node, &key) else {
            debug!("Item {} vanished while fetching, abandoning", key);
            inner.annotator.discard(tree, &handle);
            return CycleOutcome::Abandoned;
        };

        let outcome = match inner.annotator.finalize(tree, &current, &handle, &value) {
            Finalized::Populated(_) => {
                debug!("Added {} to {}", value, key);
                CycleOutcome::Populated
            }
            Finalized::AlreadyAnnotated => CycleOutcome::AlreadyDone,
            Finalized::NoFacilities => CycleOutcome::Abandoned,
        };

        drop(lock);
        outcome
    }

    pub fn tree(&self) -> &Arc<dyn TreePort> {
        &self.inner.tree
    }

    pub fn locks(&self) -> &LockManager {
        &self.inner.locks
    }

    /// 会话缓存中键对应的值
    pub fn cached(&self, key: &ItemKey) -> Option<String> {
        self.inner.fetcher.cache().get(key)
    }
}

#[cfg(test)]
#[path = "annotation_engine_test.rs"]
mod tests;
