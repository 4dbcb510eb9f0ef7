// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 会话级键值存储
///
/// 生命周期与浏览会话一致，不做过期处理，也不跨会话持久化
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// 写入一次：键已存在时保留旧值
    ///
    /// # 返回值
    ///
    /// 存储中最终保留的值（先写者胜出）
    fn put_if_absent(&self, key: &str, value: String) -> String;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
