// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::ports::tree::NodeId;
use std::fmt;

/// 列表项键
///
/// 列表项详情页地址的路径部分，用于缓存和加锁。节点可能被宿主页面替换，
/// 因此键不依赖节点身份，而是在发现时从链接地址派生，整个注释周期内不变。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 列表项实体
///
/// 文档树中代表一条房源的节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// 列表项节点
    pub node: NodeId,
    /// 发现时派生的键，没有可解析的链接时为空
    pub key: Option<ItemKey>,
    /// 设施子容器，注释片段追加在这里
    pub facilities: Option<NodeId>,
}

/// 注释状态
///
/// 状态转换：Absent → Pending → Populated；周期被放弃时回到 Absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationState {
    /// 没有注释片段
    Absent,
    /// 占位片段已插入，等待取值
    Pending,
    /// 片段已携带最终值
    Populated,
}

impl fmt::Display for AnnotationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnnotationState::Absent => write!(f, "absent"),
            AnnotationState::Pending => write!(f, "pending"),
            AnnotationState::Populated => write!(f, "populated"),
        }
    }
}
