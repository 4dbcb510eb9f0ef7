// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::annotation_engine::Engine;
use crate::domain::models::outcome::{CycleOutcome, RunSummary};
use crate::domain::ports::tree::{NodeId, TreeQueryPort};
use crate::infrastructure::dom::change_feed::{ChangeFeed, MutationBatch};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// 变更流工作器
///
/// 启动时扫描整个文档一次，之后只根据变更流的批次做增量扫描。
/// 每个发现的列表项在独立任务中运行注释周期，周期之间互不等待
pub struct FeedWorker {
    engine: Engine,
}

/// 运行中的工作器句柄
///
/// 句柄被丢弃时工作器同样会停止
pub struct EngineHandle {
    shutdown: Option<oneshot::Sender<()>>,
    driver: JoinHandle<RunSummary>,
}

impl EngineHandle {
    /// 停止消费变更流，处理已到达的批次，等待所有周期结束
    ///
    /// # 返回值
    ///
    /// 按终态统计的运行结果
    pub async fn shutdown(mut self) -> RunSummary {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match (&mut self.driver).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Feed worker terminated abnormally: {}", e);
                RunSummary::default()
            }
        }
    }
}

impl FeedWorker {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// 在后台启动工作器
    ///
    /// 没有变更流时只执行首次扫描，等其中的周期结束后自行退出
    pub fn spawn(self, feed: Option<ChangeFeed>) -> EngineHandle {
        let (tx, rx) = oneshot::channel();
        let driver = tokio::spawn(self.run(feed, rx));
        EngineHandle {
            shutdown: Some(tx),
            driver,
        }
    }

    async fn run(self, feed: Option<ChangeFeed>, mut shutdown: oneshot::Receiver<()>) -> RunSummary {
        let mut tasks = JoinSet::new();
        let mut summary = RunSummary::default();

        let root = self.engine.tree().root();
        let started = self.spawn_cycles(root, &mut tasks);
        info!("Initial scan found {} items", started);

        if let Some(mut feed) = feed {
            loop {
                tokio::select! {
                    _ = &mut shutdown => break,
                    batch = feed.next_batch() => match batch {
                        Some(batch) => self.process(batch, &mut tasks),
                        None => break,
                    },
                    Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                        Self::record(&mut summary, joined);
                    }
                }
            }

            while let Some(batch) = feed.try_next_batch() {
                self.process(batch, &mut tasks);
            }
        }
        while let Some(joined) = tasks.join_next().await {
            Self::record(&mut summary, joined);
        }

        info!(
            "Annotation session finished: {} populated, {} skipped, {} abandoned, {} failed",
            summary.populated,
            summary.skipped_locked + summary.already_done + summary.missing_key,
            summary.abandoned + summary.no_facilities,
            summary.failed + summary.crashed
        );
        summary
    }

    fn process(&self, batch: MutationBatch, tasks: &mut JoinSet<CycleOutcome>) {
        let tree = self.engine.tree();
        for node in batch.added {
            // Nodes removed again before the batch arrived are ignored
            if !tree.is_connected(node) {
                continue;
            }
            self.spawn_cycles(node, tasks);
        }
    }

    fn spawn_cycles(&self, root: NodeId, tasks: &mut JoinSet<CycleOutcome>) -> usize {
        let items = self.engine.scan(root);
        if !items.is_empty() {
            debug!("Discovered {} items under {:?}", items.len(), root);
        }
        for &item in &items {
            let engine = self.engine.clone();
            tasks.spawn(async move { engine.run_cycle(item).await });
        }
        items.len()
    }

    fn record(summary: &mut RunSummary, joined: Result<CycleOutcome, JoinError>) {
        match joined {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                warn!("Annotation cycle panicked: {}", e);
                summary.crashed += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "feed_worker_test.rs"]
mod tests;
