// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::FetchSettings;
use crate::engines::traits::{FetchError, PageResponse, PageSource};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// 基于reqwest实现的详情页来源
///
/// 客户端不启用 cookie 存储，所有请求都不携带凭据；
/// 标识请求头作为默认请求头附加到每个请求
pub struct ReqwestPageSource {
    client: reqwest::Client,
}

impl ReqwestPageSource {
    /// 根据抓取配置创建页面来源
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestPageSource)` - 创建成功
    /// * `Err(FetchError)` - 请求头或客户端构建失败
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let name = HeaderName::from_bytes(settings.marker_header_name.as_bytes())
            .map_err(|e| FetchError::Other(format!("Invalid marker header name: {}", e)))?;
        let value = HeaderValue::from_str(&settings.marker_header_value)
            .map_err(|e| FetchError::Other(format!("Invalid marker header value: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(name, value);

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers);

        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageSource for ReqwestPageSource {
    /// 执行HTTP GET
    ///
    /// 非 2xx 状态码不视为错误，页面内容照常返回
    async fn fetch(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;

        let status_code = response.status().as_u16();
        if !response.status().is_success() {
            warn!("Detail page {} answered with status {}", url, status_code);
        }

        let body = response.text().await?;
        debug!(
            "Fetched {} ({} bytes) in {}ms",
            url,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(PageResponse { status_code, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
