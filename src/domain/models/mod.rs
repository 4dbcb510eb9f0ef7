// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 列表项（item）：列表项节点、键和注释状态
/// - 标记（markers）：识别页面结构所用的类名
/// - 片段（fragment）：占位和结果注释片段
/// - 结果（outcome）：注释周期的终态和运行统计
pub mod fragment;
pub mod item;
pub mod markers;
pub mod outcome;
