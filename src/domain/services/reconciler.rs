// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::{Item, ItemKey};
use crate::domain::ports::tree::{NodeId, TreeQueryPort};
use crate::domain::services::scanner::Scanner;

/// 重定位器
///
/// 异步间隙之后，周期开始时捕获的列表项节点可能已被宿主页面移除或替换。
/// 原节点仍在文档中时直接使用它；否则在当前文档中按键重新查找
#[derive(Debug, Clone)]
pub struct Reconciler {
    scanner: Scanner,
}

impl Reconciler {
    pub fn new(scanner: Scanner) -> Self {
        Self { scanner }
    }

    /// 找回周期所属的列表项
    ///
    /// # 参数
    ///
    /// * `origin` - 周期开始时的列表项节点
    /// * `key` - 周期开始时派生的键
    ///
    /// # 返回值
    ///
    /// 原节点仍挂在文档上且键未变时返回原节点；否则返回当前文档中第一个
    /// 键相同且尚未带注释的列表项，全部已带注释时返回第一个键相同的列表项。
    /// 找不到时返回 `None`，调用方据此放弃本次周期
    pub fn relocate<Q: TreeQueryPort + ?Sized>(
        &self,
        tree: &Q,
        origin: NodeId,
        key: &ItemKey,
    ) -> Option<Item> {
        if tree.is_connected(origin) {
            let item = self.scanner.item(tree, origin);
            if item.key.as_ref() == Some(key) {
                return Some(item);
            }
        }

        let candidates: Vec<Item> = self
            .scanner
            .find_items(tree, tree.root())
            .into_iter()
            .map(|node| self.scanner.item(tree, node))
            .filter(|item| item.key.as_ref() == Some(key))
            .collect();

        let annotation_class = &self.scanner.markers().annotation_class;
        let unannotated = candidates
            .iter()
            .find(|item| {
                tree.find_first_with_class(item.node, annotation_class)
                    .is_none()
            })
            .cloned();
        unannotated.or_else(|| candidates.into_iter().next())
    }
}
