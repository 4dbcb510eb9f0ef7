// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::ports::tree::NodeId;
use tokio::sync::mpsc;

/// 一批结构变更
///
/// 只包含新插入子树的根元素，文本和注释节点不在其中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationBatch {
    pub added: Vec<NodeId>,
}

/// 变更流
///
/// 按变更顺序逐批交付，同一时刻只有一个消费者
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: mpsc::UnboundedReceiver<MutationBatch>,
}

impl ChangeFeed {
    /// 创建发送端与变更流
    ///
    /// 其他文档树实现可以通过发送端接入同一个变更流
    pub fn channel() -> (mpsc::UnboundedSender<MutationBatch>, ChangeFeed) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, ChangeFeed { receiver })
    }

    /// 等待下一批变更，所有发送端关闭后返回 `None`
    pub async fn next_batch(&mut self) -> Option<MutationBatch> {
        self.receiver.recv().await
    }

    /// 取出已到达的下一批变更，不等待
    pub fn try_next_batch(&mut self) -> Option<MutationBatch> {
        self.receiver.try_recv().ok()
    }
}
