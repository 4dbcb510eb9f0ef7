// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 会话级的写一次缓存
pub mod memory_store;
pub mod session_cache;
