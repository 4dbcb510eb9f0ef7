// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use thiserror::Error;

/// 注释引擎错误类型
///
/// 预期内的缺失（没有链接、元素消失、锁竞争）不属于错误，
/// 由 `CycleOutcome` 表达
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("抓取错误: {0}")]
    Fetch(#[from] FetchError),

    #[error("未找到被监听的容器元素: #{0}")]
    ContainerMissing(String),

    #[error("无效选择器: {0}")]
    InvalidSelector(String),

    #[error("无效地址: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}
