// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::ItemKey;
use crate::domain::ports::session_store::SessionStore;
use metrics::counter;
use std::sync::Arc;
use tracing::debug;

/// 会话缓存
///
/// 列表项键到补充值的映射，每个键在一次会话中只写一次。
/// 存储键为固定前缀加列表项键，例如 `floorarea-/property-for-sale/123`
#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn SessionStore>,
    prefix: String,
}

impl SessionCache {
    pub fn new(store: Arc<dyn SessionStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// 生成存储键
    pub fn storage_key(&self, key: &ItemKey) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub fn get(&self, key: &ItemKey) -> Option<String> {
        let value = self.store.get(&self.storage_key(key));
        if value.is_some() {
            debug!("Cache hit for {}", key);
            counter!("annotrs_cache_hits_total").increment(1);
        }
        value
    }

    /// 写入值，键已存在时返回已缓存的值
    pub fn put(&self, key: &ItemKey, value: String) -> String {
        self.store.put_if_absent(&self.storage_key(key), value)
    }
}
