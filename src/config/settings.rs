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

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 应用程序配置设置
///
/// 包含激活规则、页面选择器、抓取、缓存和会话等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 引擎激活配置
    pub engine: EngineSettings,
    /// 页面标记配置
    pub selectors: SelectorSettings,
    /// 详情页抓取配置
    pub fetch: FetchSettings,
    /// 会话缓存配置
    pub cache: CacheSettings,
    /// 会话配置
    pub session: SessionSettings,
}

/// 引擎激活配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// 允许激活的路径前缀
    pub allowed_paths: Vec<String>,
    /// 被监听容器元素的 id
    pub container_id: String,
}

/// 页面标记配置设置
///
/// 列表项、设施子容器以及注释片段使用的类名
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorSettings {
    /// 列表项标记类
    pub item_class: String,
    /// 包含详情链接的容器类
    pub link_container_class: String,
    /// 设施子容器类
    pub facilities_class: String,
    /// 注释片段保留类
    pub annotation_class: String,
    /// 占位状态类
    pub pending_class: String,
    /// 面积图标类
    pub icon_class: String,
    /// 设施项通用类
    pub option_class: String,
    /// 详情页中目标字段的选择器
    pub value_selector: String,
}

/// 详情页抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 站点源地址（仅用于加载初始列表页）
    pub origin: String,
    /// 标识请求来源的请求头名称
    pub marker_header_name: String,
    /// 标识请求来源的请求头值
    pub marker_header_value: String,
    /// User-Agent
    pub user_agent: String,
    /// 请求超时时间（秒），为空表示不设置超时
    pub timeout_secs: Option<u64>,
}

/// 会话缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 缓存键前缀
    pub key_prefix: String,
    /// 字段缺失时的回退值
    pub fallback_value: String,
}

/// 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 默认列表页路径
    pub start_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及
    /// `ANNOTRS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// 从指定文件加载配置，文件中未出现的项使用默认值
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径（格式由扩展名决定）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Activation gate
            .set_default(
                "engine.allowed_paths",
                vec![
                    "/properties",
                    "/property-for-sale",
                    "/houses-for-sale",
                    "/flats-for-sale",
                    "/new",
                ],
            )?
            .set_default("engine.container_id", "content")?
            // Page markers
            .set_default("selectors.item_class", "propertyWrap")?
            .set_default("selectors.link_container_class", "infoWrap")?
            .set_default("selectors.facilities_class", "facilities")?
            .set_default("selectors.annotation_class", "added-floor-area")?
            .set_default("selectors.pending_class", "floor-area-spinner")?
            .set_default("selectors.icon_class", "icon-floor_area")?
            .set_default("selectors.option_class", "opt")?
            .set_default("selectors.value_selector", ".icon-floor_area + strong")?
            // Fetch
            .set_default("fetch.origin", "https://espc.com")?
            .set_default("fetch.marker_header_name", "espc-floor-area-extension")?
            .set_default("fetch.marker_header_value", "true")?
            .set_default("fetch.user_agent", "Mozilla/5.0 (compatible; annotrs/0.1)")?
            // Cache
            .set_default("cache.key_prefix", "floorarea-")?
            .set_default("cache.fallback_value", "N/A")?
            // Session
            .set_default("session.start_path", "/property-for-sale")
    }

    fn environment() -> Environment {
        Environment::with_prefix("ANNOTRS")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("engine.allowed_paths")
            .try_parsing(true)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
