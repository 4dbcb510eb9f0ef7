// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 扫描器（scanner）：发现列表项并读取键
/// - 锁管理器（lock_manager）：同一键同时只有一个周期在处理
/// - 抓取器（fetcher）：缓存优先地解析键对应的值
/// - 注释器（annotator）：插入占位并最终写入结果
/// - 重新定位器（reconciler）：抓取完成后按键找回当前的列表项
pub mod annotator;
pub mod fetcher;
pub mod lock_manager;
pub mod reconciler;
pub mod scanner;
