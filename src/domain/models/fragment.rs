// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::markers::Markers;

/// 片段节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element {
        tag: String,
        classes: Vec<String>,
        attrs: Vec<(String, String)>,
        children: Vec<FragmentNode>,
    },
    Text(String),
}

impl FragmentNode {
    /// 子节点，文本节点没有子节点
    pub fn children(&self) -> &[FragmentNode] {
        match self {
            FragmentNode::Element { children, .. } => children,
            FragmentNode::Text(_) => &[],
        }
    }

    fn span(classes: &[&str], attrs: Vec<(String, String)>, children: Vec<FragmentNode>) -> Self {
        FragmentNode::Element {
            tag: "span".to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attrs,
            children,
        }
    }
}

/// 片段种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// 占位（加载中）
    Pending,
    /// 携带已解析的值
    Value(String),
}

/// 注释片段
///
/// 追加到设施子容器末尾的小片段，根节点带有保留标记类；
/// 占位状态额外带有一个加载指示子节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFragment {
    pub kind: FragmentKind,
    pub root: FragmentNode,
}

impl AnnotationFragment {
    /// 占位片段
    ///
    /// `<span class="opt added-floor-area"><span class="floor-area-spinner"></span><span class="icon-floor_area" style="margin-left:8px"></span></span>`
    pub fn pending(markers: &Markers) -> Self {
        let root = FragmentNode::span(
            &[&markers.option_class, &markers.annotation_class],
            Vec::new(),
            vec![
                FragmentNode::span(&[&markers.pending_class], Vec::new(), Vec::new()),
                Self::icon(markers),
            ],
        );
        Self {
            kind: FragmentKind::Pending,
            root,
        }
    }

    /// 取值片段
    ///
    /// `<span class="opt added-floor-area">{value}<span class="icon-floor_area" style="margin-left:8px"></span></span>`
    pub fn populated(markers: &Markers, value: &str) -> Self {
        let root = FragmentNode::span(
            &[&markers.option_class, &markers.annotation_class],
            Vec::new(),
            vec![FragmentNode::Text(value.to_string()), Self::icon(markers)],
        );
        Self {
            kind: FragmentKind::Value(value.to_string()),
            root,
        }
    }

    fn icon(markers: &Markers) -> FragmentNode {
        FragmentNode::span(
            &[&markers.icon_class],
            vec![("style".to_string(), "margin-left:8px".to_string())],
            Vec::new(),
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.kind, FragmentKind::Pending)
    }
}
