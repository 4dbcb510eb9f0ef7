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

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 地址无效
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 详情页响应
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub body: String,
}

/// 详情页来源特质
///
/// 网络端口：给定绝对地址，返回页面 HTML。实现必须省略 cookie
/// 并附带标识请求来源的请求头
#[async_trait]
pub trait PageSource: Send + Sync {
    /// 获取页面
    async fn fetch(&self, url: &Url) -> Result<PageResponse, FetchError>;

    /// 来源名称
    fn name(&self) -> &'static str;
}
