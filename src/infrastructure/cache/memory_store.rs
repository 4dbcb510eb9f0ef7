// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::ports::session_store::SessionStore;
use dashmap::DashMap;

/// 内存会话存储
///
/// 随引擎实例一起创建和丢弃，相当于一次浏览会话的 sessionStorage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn put_if_absent(&self, key: &str, value: String) -> String {
        self.entries
            .entry(key.to_string())
            .or_insert(value)
            .value()
            .clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());

        assert_eq!(store.put_if_absent("k", "first".to_string()), "first");
        assert_eq!(store.put_if_absent("k", "second".to_string()), "first");
        assert_eq!(store.get("k").as_deref(), Some("first"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("nope"), None);
    }
}
