// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::{Item, ItemKey};
use crate::domain::models::markers::Markers;
use crate::domain::ports::tree::{NodeId, TreeQueryPort};
use crate::utils::url_utils::path_key;

/// 列表项扫描器
///
/// 纯同步、无副作用：只读取文档树
#[derive(Debug, Clone)]
pub struct Scanner {
    markers: Markers,
}

impl Scanner {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// 查找 `root` 子树（包含 `root` 本身）中的全部列表项，按文档顺序
    ///
    /// 变更流可能直接报告单个列表项节点，因此 `root` 本身也参与匹配
    pub fn find_items<Q: TreeQueryPort + ?Sized>(&self, tree: &Q, root: NodeId) -> Vec<NodeId> {
        tree.find_all_with_class(root, &self.markers.item_class)
    }

    /// 读取列表项的键和设施子容器
    pub fn item<Q: TreeQueryPort + ?Sized>(&self, tree: &Q, node: NodeId) -> Item {
        Item {
            node,
            key: self.item_key(tree, node),
            facilities: tree.find_first_with_class(node, &self.markers.facilities_class),
        }
    }

    /// 从 `.infoWrap > a` 的链接地址派生键
    pub fn item_key<Q: TreeQueryPort + ?Sized>(&self, tree: &Q, node: NodeId) -> Option<ItemKey> {
        let base = tree.base_url();
        tree.find_all_with_class(node, &self.markers.link_container_class)
            .into_iter()
            .filter(|&container| container != node)
            .filter_map(|container| tree.child_element_by_tag(container, &self.markers.link_tag))
            .find_map(|anchor| tree.attribute(anchor, "href"))
            .and_then(|href| path_key(&base, &href))
            .map(ItemKey::new)
    }
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
