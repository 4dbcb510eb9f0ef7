// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 无界面文档模块
///
/// 提供文档树端口的内存实现，包括 HTML 导入、序列化和变更流
pub mod change_feed;
pub mod document;
mod html;

pub use change_feed::{ChangeFeed, MutationBatch};
pub use document::{Document, DomMutation};
