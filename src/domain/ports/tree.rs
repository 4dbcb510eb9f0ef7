// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fragment::AnnotationFragment;
use url::Url;

/// 文档树节点句柄
///
/// 句柄在节点被移除后仍然有效，可用 `is_connected` 判断是否还挂在文档上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 文档树查询端口
pub trait TreeQueryPort: Send + Sync {
    /// 文档根节点
    fn root(&self) -> NodeId;

    /// 文档地址，用于解析相对链接
    fn base_url(&self) -> Url;

    /// 节点是否仍挂在文档根下
    fn is_connected(&self, node: NodeId) -> bool;

    /// `ancestor` 是否为 `node` 本身或其祖先
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    fn is_element(&self, node: NodeId) -> bool;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// 带有指定类的全部元素，包含 `root` 本身，按文档顺序
    fn find_all_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// 第一个带有指定类的后代元素，不包含 `root` 本身
    fn find_first_with_class(&self, root: NodeId, class: &str) -> Option<NodeId>;

    /// 第一个指定标签名的子元素
    fn child_element_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn text_content(&self, node: NodeId) -> String;
}

/// 文档树变更端口
pub trait TreeMutationPort: Send + Sync {
    /// 将片段作为最后一个子节点追加到 `parent`，返回片段根节点
    ///
    /// `parent` 不是元素时返回 `None`
    fn append_fragment(&self, parent: NodeId, fragment: &AnnotationFragment) -> Option<NodeId>;

    /// 从父节点上移除节点，节点原本就是游离状态时返回 `false`
    fn remove_node(&self, node: NodeId) -> bool;
}

/// 同时具备查询和变更能力的文档树
pub trait TreePort: TreeQueryPort + TreeMutationPort {}

impl<T: TreeQueryPort + TreeMutationPort> TreePort for T {}
