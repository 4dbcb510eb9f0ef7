// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::ports::tree::NodeId;
use crate::infrastructure::dom::document::{ElementData, NodeKind, Tree, ROOT};
use ego_tree::NodeRef;
use scraper::{Html, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// 解析完整文档并挂到根节点下
pub(super) fn import_document(tree: &mut Tree, markup: &str) {
    let html = Html::parse_document(markup);
    for child in html.tree.root().children() {
        if let Some(id) = import_node(tree, child) {
            tree.link(ROOT, id);
        }
    }
}

/// 解析 HTML 片段，返回游离的顶层节点
///
/// scraper 会把片段包在一个 `<html>` 元素里，这一层被展开
pub(super) fn import_fragment(tree: &mut Tree, markup: &str) -> Vec<NodeId> {
    let html = Html::parse_fragment(markup);
    let mut roots = Vec::new();
    for child in html.tree.root().children() {
        match child.value() {
            Node::Element(element) if element.name() == "html" => {
                for inner in child.children() {
                    roots.extend(import_node(tree, inner));
                }
            }
            _ => roots.extend(import_node(tree, child)),
        }
    }
    roots
}

/// 导入一棵子树，返回游离的子树根
///
/// 用显式栈遍历，嵌套深度不受调用栈限制
fn import_node(tree: &mut Tree, node: NodeRef<'_, Node>) -> Option<NodeId> {
    let root = create_node(tree, node)?;
    let mut stack: Vec<(NodeRef<'_, Node>, NodeId)> = Vec::new();
    push_children(&mut stack, node, root);

    while let Some((current, parent)) = stack.pop() {
        if let Some(id) = create_node(tree, current) {
            tree.link(parent, id);
            push_children(&mut stack, current, id);
        }
    }
    Some(root)
}

/// 子节点逆序入栈，出栈时保持文档顺序
fn push_children<'a>(
    stack: &mut Vec<(NodeRef<'a, Node>, NodeId)>,
    node: NodeRef<'a, Node>,
    parent: NodeId,
) {
    let children: Vec<NodeRef<'a, Node>> = node.children().collect();
    stack.extend(children.into_iter().rev().map(|child| (child, parent)));
}

fn create_node(tree: &mut Tree, node: NodeRef<'_, Node>) -> Option<NodeId> {
    let kind = match node.value() {
        Node::Element(element) => NodeKind::Element(ElementData {
            name: element.name().to_string(),
            attrs: element
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }),
        Node::Text(text) => NodeKind::Text((**text).to_owned()),
        Node::Comment(comment) => NodeKind::Comment((**comment).to_owned()),
        _ => return None,
    };
    Some(tree.create(kind))
}

/// 序列化节点为 HTML
pub(super) fn serialize(tree: &Tree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

fn write_node(tree: &Tree, node: NodeId, out: &mut String) {
    let mut stack = vec![Step::Open(node)];
    while let Some(step) = stack.pop() {
        let current = match step {
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
            Step::Open(current) => current,
        };

        match tree.kind(current) {
            Some(NodeKind::Document) => {
                stack.extend(tree.children(current).iter().rev().map(|&c| Step::Open(c)));
            }
            Some(NodeKind::Text(text)) => out.push_str(&html_escape::encode_text(text)),
            Some(NodeKind::Comment(comment)) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Some(NodeKind::Element(element)) => {
                out.push('<');
                out.push_str(&element.name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.name.as_str()) {
                    continue;
                }
                stack.push(Step::Close(&element.name));
                stack.extend(tree.children(current).iter().rev().map(|&c| Step::Open(c)));
            }
            None => {}
        }
    }
}
