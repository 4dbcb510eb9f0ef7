// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：列表项、注释片段和周期结果
/// - 端口（ports）：文档树和会话存储的抽象接口
/// - 服务（services）：扫描、加锁、抓取、注释和重新定位
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod ports;
pub mod services;
