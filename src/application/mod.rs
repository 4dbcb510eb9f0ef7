// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 将领域服务和基础设施组装成注释引擎，并负责在文档上激活它
pub mod activation;
pub mod annotation_engine;

pub use activation::activate;
pub use annotation_engine::Engine;
