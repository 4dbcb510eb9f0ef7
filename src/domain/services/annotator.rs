// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fragment::AnnotationFragment;
use crate::domain::models::item::{AnnotationState, Item};
use crate::domain::models::markers::Markers;
use crate::domain::ports::tree::{NodeId, TreePort, TreeQueryPort};
use tracing::debug;

/// 占位片段句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHandle {
    pub fragment: NodeId,
}

/// 写入最终值的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalized {
    /// 已追加取值片段
    Populated(NodeId),
    /// 列表项上已有其他注释片段，未追加
    AlreadyAnnotated,
    /// 列表项缺少设施子容器
    NoFacilities,
}

/// 注释器
///
/// 负责单个列表项上的占位 → 取值状态转换，并保证每个列表项最多一个注释片段
#[derive(Debug, Clone)]
pub struct Annotator {
    markers: Markers,
}

impl Annotator {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// 列表项下是否已有带保留标记类的片段
    pub fn has_annotation<Q: TreeQueryPort + ?Sized>(&self, tree: &Q, item: &Item) -> bool {
        tree.find_first_with_class(item.node, &self.markers.annotation_class)
            .is_some()
    }

    /// 当前注释状态
    pub fn state<Q: TreeQueryPort + ?Sized>(&self, tree: &Q, item: &Item) -> AnnotationState {
        match tree.find_first_with_class(item.node, &self.markers.annotation_class) {
            None => AnnotationState::Absent,
            Some(fragment) => {
                if tree
                    .find_first_with_class(fragment, &self.markers.pending_class)
                    .is_some()
                {
                    AnnotationState::Pending
                } else {
                    AnnotationState::Populated
                }
            }
        }
    }

    /// 插入占位片段
    ///
    /// 调用方必须已经确认 `!has_annotation(item)`；列表项没有设施子容器时返回 `None`
    pub fn insert_pending<T: TreePort + ?Sized>(
        &self,
        tree: &T,
        item: &Item,
    ) -> Option<PendingHandle> {
        let facilities = item.facilities.filter(|&f| tree.contains(item.node, f))?;
        let fragment = tree.append_fragment(facilities, &AnnotationFragment::pending(&self.markers))?;
        Some(PendingHandle { fragment })
    }

    /// 写入最终值
    ///
    /// 重新查找设施子容器（宿主页面可能已重建它），移除仍然存在的占位片段，
    /// 再追加携带 `value` 的片段。列表项是否仍在文档中由调用方事先通过重定位确认
    pub fn finalize<T: TreePort + ?Sized>(
        &self,
        tree: &T,
        item: &Item,
        handle: &PendingHandle,
        value: &str,
    ) -> Finalized {
        self.discard(tree, handle);

        if self.has_annotation(tree, item) {
            debug!("Item already carries an annotation, skipping");
            return Finalized::AlreadyAnnotated;
        }

        let Some(facilities) = tree.find_first_with_class(item.node, &self.markers.facilities_class)
        else {
            return Finalized::NoFacilities;
        };

        match tree.append_fragment(
            facilities,
            &AnnotationFragment::populated(&self.markers, value),
        ) {
            Some(node) => Finalized::Populated(node),
            None => Finalized::NoFacilities,
        }
    }

    /// 撤回占位片段
    ///
    /// 只有片段仍挂在文档上时才移除；随列表项一起被移除的片段保持原样
    pub fn discard<T: TreePort + ?Sized>(&self, tree: &T, handle: &PendingHandle) -> bool {
        if tree.is_connected(handle.fragment) {
            tree.remove_node(handle.fragment)
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "annotator_test.rs"]
mod tests;
