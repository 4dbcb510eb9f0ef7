// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 消费变更流，为每个发现的列表项启动注释周期
pub mod feed_worker;

pub use feed_worker::{EngineHandle, FeedWorker};
