// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 端口模块
///
/// 领域服务只依赖这些抽象：
/// - 文档树查询/变更端口（tree）
/// - 会话存储端口（session_store）
pub mod session_store;
pub mod tree;
