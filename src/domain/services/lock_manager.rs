// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::ItemKey;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 按键加锁的管理器
///
/// 同一键在任意时刻最多只有一个进行中的周期。加锁是同步的，
/// 必须在任何异步步骤之前完成。每次获取都会分配一个令牌，
/// 守卫只释放令牌仍属于自己的键
#[derive(Clone, Debug, Default)]
pub struct LockManager {
    held: Arc<DashMap<ItemKey, u64>>,
    next_token: Arc<AtomicU64>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试获取键
    ///
    /// # 返回值
    ///
    /// * `Some(KeyLock)` - 获取成功，调用方持有该键直到锁被释放
    /// * `None` - 键已被其他周期持有
    pub fn try_acquire(&self, key: &ItemKey) -> Option<KeyLock> {
        match self.held.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let token = self.next_token.fetch_add(1, Ordering::Relaxed);
                slot.insert(token);
                Some(KeyLock {
                    manager: self.clone(),
                    key: key.clone(),
                    token,
                })
            }
        }
    }

    /// 强制释放键，键未被持有时为空操作
    ///
    /// 原持有者的守卫随后被丢弃时不会影响新的持有者
    pub fn release(&self, key: &ItemKey) -> bool {
        self.held.remove(key).is_some()
    }

    pub fn is_held(&self, key: &ItemKey) -> bool {
        self.held.contains_key(key)
    }

    /// 当前持有的键数量
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    fn release_owned(&self, key: &ItemKey, token: u64) -> bool {
        self.held.remove_if(key, |_, held| *held == token).is_some()
    }
}

/// 已持有的键
///
/// 在所有退出路径上释放：显式调用 `release` 或离开作用域
#[derive(Debug)]
#[must_use = "dropping the lock releases the key immediately"]
pub struct KeyLock {
    manager: LockManager,
    key: ItemKey,
    token: u64,
}

impl KeyLock {
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn release(self) {
        // Drop does the work
    }
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        self.manager.release_owned(&self.key, self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_exclusive() {
        let locks = LockManager::new();
        let key = ItemKey::from("/property-for-sale/123");

        let held = locks.try_acquire(&key).unwrap();
        assert!(locks.is_held(&key));
        assert!(locks.try_acquire(&key).is_none());

        held.release();
        assert!(!locks.is_held(&key));
        assert!(locks.try_acquire(&key).is_some());
    }

    #[test]
    fn test_lock_released_on_drop() {
        let locks = LockManager::new();
        let key = ItemKey::from("/property-for-sale/1");
        {
            let _held = locks.try_acquire(&key).unwrap();
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[test]
    fn test_release_is_idempotent() {
        let locks = LockManager::new();
        let key = ItemKey::from("/property-for-sale/1");

        assert!(!locks.release(&key));
        let held = locks.try_acquire(&key).unwrap();
        assert!(locks.release(&key));
        assert!(!locks.release(&key));
        // Guard drop after explicit release must not panic or resurrect the key
        drop(held);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_stale_guard_does_not_release_new_owner() {
        let locks = LockManager::new();
        let key = ItemKey::from("/property-for-sale/123");

        let stale = locks.try_acquire(&key).unwrap();
        assert!(locks.release(&key));
        let current = locks.try_acquire(&key).unwrap();

        drop(stale);
        assert!(locks.is_held(&key));
        assert!(locks.try_acquire(&key).is_none());

        drop(current);
        assert!(!locks.is_held(&key));
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let locks = LockManager::new();
        let a = locks.try_acquire(&ItemKey::from("/a")).unwrap();
        let b = locks.try_acquire(&ItemKey::from("/b")).unwrap();
        assert_eq!(a.key().as_str(), "/a");
        assert_eq!(b.key().as_str(), "/b");
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_independent_managers_do_not_share_state() {
        let first = LockManager::new();
        let second = LockManager::new();
        let key = ItemKey::from("/property-for-sale/1");

        let _held = first.try_acquire(&key).unwrap();
        assert!(second.try_acquire(&key).is_some());
    }
}
