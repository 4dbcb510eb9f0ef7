// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fragment::{AnnotationFragment, FragmentNode};
use crate::domain::ports::tree::{NodeId, TreeMutationPort, TreeQueryPort};
use crate::infrastructure::dom::change_feed::{ChangeFeed, MutationBatch};
use crate::infrastructure::dom::html;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

pub(super) const ROOT: NodeId = NodeId(0);

/// 节点种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// 元素数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }
}

struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

struct Observer {
    target: NodeId,
    sender: mpsc::UnboundedSender<MutationBatch>,
}

/// 节点竞技场
///
/// 节点从不回收，被移除的节点只是断开与父节点的连接，
/// 因此已发出的 `NodeId` 在文档生命周期内始终有效
pub struct Tree {
    nodes: Vec<NodeData>,
    observers: Vec<Observer>,
    added: Vec<NodeId>,
}

impl Tree {
    fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            observers: Vec::new(),
            added: Vec::new(),
        }
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    pub(super) fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.data(node).map(|d| &d.kind)
    }

    pub(super) fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.kind(node) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub(super) fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).and_then(|d| d.parent)
    }

    /// 创建游离节点
    pub(super) fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// 挂接子节点但不产生变更记录，用于构建尚未插入的子树
    pub(super) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child);
        self.added.push(child);
    }

    fn insert_before(&mut self, reference: NodeId, child: NodeId) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        self.detach(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.added.push(child);
        true
    }

    fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].parent = None;
        true
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// 先序遍历，包含 `root`
    fn preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.data(root).is_none() {
            return out;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// 把片段构建为游离子树，用显式栈遍历
    fn materialize(&mut self, node: &FragmentNode) -> NodeId {
        let root = self.create_fragment_node(node);
        let mut stack: Vec<(&FragmentNode, NodeId)> = node
            .children()
            .iter()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((current, parent)) = stack.pop() {
            let id = self.create_fragment_node(current);
            self.link(parent, id);
            stack.extend(current.children().iter().rev().map(|child| (child, id)));
        }
        root
    }

    fn create_fragment_node(&mut self, node: &FragmentNode) -> NodeId {
        match node {
            FragmentNode::Text(text) => self.create(NodeKind::Text(text.clone())),
            FragmentNode::Element {
                tag, classes, attrs, ..
            } => {
                let mut element = ElementData::new(tag.clone());
                if !classes.is_empty() {
                    element.set_attr("class", &classes.join(" "));
                }
                for (name, value) in attrs {
                    element.set_attr(name, value);
                }
                self.create(NodeKind::Element(element))
            }
        }
    }

    /// 把本次变更中插入的元素分发给观察者，每个观察者最多收到一批
    fn flush(&mut self) {
        let added = std::mem::take(&mut self.added);
        if added.is_empty() || self.observers.is_empty() {
            return;
        }

        let mut observers = std::mem::take(&mut self.observers);
        observers.retain(|observer| {
            let mut nodes: Vec<NodeId> = Vec::new();
            for &node in &added {
                if node != observer.target
                    && self.element(node).is_some()
                    && self.contains(observer.target, node)
                    && !nodes.contains(&node)
                {
                    nodes.push(node);
                }
            }
            if nodes.is_empty() {
                return !observer.sender.is_closed();
            }
            observer.sender.send(MutationBatch { added: nodes }).is_ok()
        });
        self.observers = observers;
    }
}

/// 无界面文档
///
/// 以竞技场保存的文档树，可从 HTML 构建，实现查询和变更两个端口，
/// 并能对指定容器的子树插入提供变更流。克隆得到的是同一棵树的句柄。
///
/// 竞技场不回收节点：被移除的子树、撤回的占位片段和被替换的列表项
/// 都会保留到文档被丢弃为止，内存随会话中的变更次数线性增长。
/// 适合单个列表页的会话，不适合长期存活、反复重绘的文档
#[derive(Clone)]
pub struct Document {
    tree: Arc<RwLock<Tree>>,
    url: Arc<Url>,
}

impl Document {
    /// 创建空文档
    pub fn new(url: Url) -> Self {
        Self {
            tree: Arc::new(RwLock::new(Tree::new())),
            url: Arc::new(url),
        }
    }

    /// 解析完整的 HTML 文档
    ///
    /// # 参数
    ///
    /// * `markup` - HTML 文本
    /// * `url` - 文档地址，用于解析相对链接
    pub fn parse(markup: &str, url: Url) -> Self {
        let document = Self::new(url);
        {
            let mut tree = document.tree.write();
            html::import_document(&mut tree, markup);
        }
        document
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 监听 `target` 子树中的插入
    ///
    /// 返回的变更流每次变更操作交付一批新插入的元素
    pub fn observe(&self, target: NodeId) -> ChangeFeed {
        let (sender, feed) = ChangeFeed::channel();
        self.tree.write().observers.push(Observer { target, sender });
        feed
    }

    /// 在一次变更中执行多个操作，观察者只收到一批记录
    pub fn mutate<R>(&self, f: impl FnOnce(&mut DomMutation<'_>) -> R) -> R {
        let mut tree = self.tree.write();
        let result = f(&mut DomMutation { tree: &mut tree });
        tree.flush();
        result
    }

    /// 将 HTML 片段追加为 `parent` 的子节点，返回插入的顶层节点
    pub fn append_html(&self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        self.mutate(|m| m.append_html(parent, markup))
    }

    /// 用 HTML 片段替换节点
    pub fn replace_with_html(&self, node: NodeId, markup: &str) -> Vec<NodeId> {
        self.mutate(|m| m.replace_with_html(node, markup))
    }

    /// 移除节点
    pub fn remove(&self, node: NodeId) -> bool {
        self.mutate(|m| m.remove(node))
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.mutate(|m| m.set_attribute(node, name, value))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.read().parent(node)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.read().children(node).to_vec()
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.tree.read().element(node).map(|e| e.name.clone())
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        html::serialize(&self.tree.read(), node)
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let tree = self.tree.read();
        tree.children(node)
            .iter()
            .map(|&child| html::serialize(&tree, child))
            .collect()
    }
}

/// 一次变更中的操作集合
pub struct DomMutation<'a> {
    tree: &'a mut Tree,
}

impl DomMutation<'_> {
    pub fn append_html(&mut self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        if self.tree.element(parent).is_none() && parent != ROOT {
            return Vec::new();
        }
        let roots = html::import_fragment(self.tree, markup);
        for &root in &roots {
            self.tree.append_child(parent, root);
        }
        roots
    }

    pub fn insert_html_before(&mut self, reference: NodeId, markup: &str) -> Vec<NodeId> {
        let roots = html::import_fragment(self.tree, markup);
        let mut inserted = Vec::with_capacity(roots.len());
        for root in roots {
            if self.tree.insert_before(reference, root) {
                inserted.push(root);
            }
        }
        inserted
    }

    pub fn replace_with_html(&mut self, node: NodeId, markup: &str) -> Vec<NodeId> {
        let inserted = self.insert_html_before(node, markup);
        self.tree.detach(node);
        inserted
    }

    /// 移动已有节点到 `parent` 末尾
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        self.tree.detach(node)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeKind::Element(element)) = self.tree.nodes.get_mut(node.0).map(|d| &mut d.kind)
        {
            element.set_attr(name, value);
        }
    }
}

impl TreeQueryPort for Document {
    fn root(&self) -> NodeId {
        ROOT
    }

    fn base_url(&self) -> Url {
        self.url.as_ref().clone()
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.tree.read().contains(ROOT, node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.read().contains(ancestor, node)
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.tree.read().element(node).is_some()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .read()
            .element(node)
            .is_some_and(|e| e.has_class(class))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.read();
        tree.preorder(ROOT)
            .into_iter()
            .find(|&n| tree.element(n).and_then(|e| e.attr("id")) == Some(id))
    }

    fn find_all_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.read();
        tree.preorder(root)
            .into_iter()
            .filter(|&n| tree.element(n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    fn find_first_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let tree = self.tree.read();
        tree.preorder(root)
            .into_iter()
            .skip(1)
            .find(|&n| tree.element(n).is_some_and(|e| e.has_class(class)))
    }

    fn child_element_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        let tree = self.tree.read();
        tree.children(parent)
            .iter()
            .copied()
            .find(|&c| tree.element(c).is_some_and(|e| e.name.eq_ignore_ascii_case(tag)))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .read()
            .element(node)
            .and_then(|e| e.attr(name))
            .map(str::to_string)
    }

    fn text_content(&self, node: NodeId) -> String {
        let tree = self.tree.read();
        tree.preorder(node)
            .into_iter()
            .filter_map(|n| match tree.kind(n) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TreeMutationPort for Document {
    fn append_fragment(&self, parent: NodeId, fragment: &AnnotationFragment) -> Option<NodeId> {
        let mut tree = self.tree.write();
        tree.element(parent)?;
        let root = tree.materialize(&fragment.root);
        tree.append_child(parent, root);
        tree.flush();
        Some(root)
    }

    fn remove_node(&self, node: NodeId) -> bool {
        let mut tree = self.tree.write();
        let removed = tree.detach(node);
        tree.flush();
        removed
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
