// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组合根和引擎激活入口
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含列表项模型、端口抽象和注释周期中的各个领域服务
pub mod domain;

/// 引擎模块
///
/// 详情页抓取和字段提取
pub mod engines;

/// 基础设施模块
///
/// 提供端口的具体实现，如会话缓存和无界面文档
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 消费文档变更流并调度注释周期
pub mod workers;
