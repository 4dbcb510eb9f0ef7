// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含端口的具体实现：
/// - 缓存（cache）：会话存储和带前缀的会话缓存
/// - 文档（dom）：内存文档树及其变更流
///
/// 基础设施层依赖于领域层的抽象接口。
pub mod cache;
pub mod dom;
