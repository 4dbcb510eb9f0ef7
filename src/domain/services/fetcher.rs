// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::ItemKey;
use crate::engines::extractor::FieldExtractor;
use crate::engines::traits::{FetchError, PageSource};
use crate::infrastructure::cache::session_cache::SessionCache;
use crate::utils::url_utils::resolve_url;
use metrics::counter;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// 补充值获取器
///
/// 缓存命中直接返回；未命中时抓取详情页、提取字段（缺失时使用回退值）、
/// 写入缓存后返回。回退值和正常值一样被缓存
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn PageSource>,
    cache: SessionCache,
    extractor: FieldExtractor,
    origin: Url,
}

impl Fetcher {
    /// 创建获取器
    ///
    /// # 参数
    ///
    /// * `source` - 详情页来源
    /// * `cache` - 会话缓存
    /// * `extractor` - 字段提取器
    /// * `origin` - 宿主源地址，键相对它解析为绝对地址
    pub fn new(
        source: Arc<dyn PageSource>,
        cache: SessionCache,
        extractor: FieldExtractor,
        origin: Url,
    ) -> Self {
        Self {
            source,
            cache,
            extractor,
            origin,
        }
    }

    /// 解析键对应的值
    ///
    /// 字段缺失不是错误；网络失败原样返回给调用方，且不写缓存
    pub async fn resolve(&self, key: &ItemKey) -> Result<String, FetchError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }

        let url = resolve_url(&self.origin, key.as_str())?;
        debug!("Fetching {} via {}", url, self.source.name());
        counter!("annotrs_fetches_total").increment(1);

        let page = self.source.fetch(&url).await?;
        let value = self.extractor.extract(&page.body);
        if value == self.extractor.fallback() {
            debug!("No value found on {}", url);
        }

        Ok(self.cache.put(key, value))
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
