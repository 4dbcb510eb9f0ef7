// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::AnnotateError;
use scraper::{Html, Selector};

/// 字段提取器
///
/// 用固定的结构化选择器从详情页 HTML 中取出目标字段文本，
/// 字段缺失或为空白时返回回退值
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    selector: Selector,
    fallback: String,
}

impl FieldExtractor {
    /// 创建提取器
    ///
    /// # 参数
    ///
    /// * `selector` - CSS 选择器，例如 `.icon-floor_area + strong`
    /// * `fallback` - 字段缺失时的回退值
    pub fn new(selector: &str, fallback: impl Into<String>) -> Result<Self, AnnotateError> {
        let selector = Selector::parse(selector)
            .map_err(|e| AnnotateError::InvalidSelector(format!("{}: {:?}", selector, e)))?;
        Ok(Self {
            selector,
            fallback: fallback.into(),
        })
    }

    /// 提取字段
    ///
    /// `Html` 不是 `Send`，解析只在这个同步函数内部进行
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .next()
            .map(|element| {
                element
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// 回退值
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
