// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 注释周期终态
///
/// 每个周期由一条异步链驱动，没有取消机制，总会落到以下某个终态：
/// Discovered → AlreadyDone | MissingKey | SkippedLocked | NoFacilities
///            → PlaceholderInserted → Fetching → Failed | Abandoned | Populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    /// 已存在注释片段
    AlreadyDone,
    /// 无法解析出键，未加锁
    MissingKey,
    /// 同键周期正在进行
    SkippedLocked,
    /// 列表项缺少设施子容器
    NoFacilities,
    /// 网络或解析失败，占位已撤回
    Failed,
    /// 抓取后无法重新定位列表项
    Abandoned,
    /// 片段已携带最终值
    Populated,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::AlreadyDone => "already_done",
            CycleOutcome::MissingKey => "missing_key",
            CycleOutcome::SkippedLocked => "skipped_locked",
            CycleOutcome::NoFacilities => "no_facilities",
            CycleOutcome::Failed => "failed",
            CycleOutcome::Abandoned => "abandoned",
            CycleOutcome::Populated => "populated",
        }
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 运行统计
///
/// 按终态统计一次会话中已结束的周期
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub already_done: usize,
    pub missing_key: usize,
    pub skipped_locked: usize,
    pub no_facilities: usize,
    pub failed: usize,
    pub abandoned: usize,
    pub populated: usize,
    /// 异常终止（panic）的周期
    pub crashed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: CycleOutcome) {
        match outcome {
            CycleOutcome::AlreadyDone => self.already_done += 1,
            CycleOutcome::MissingKey => self.missing_key += 1,
            CycleOutcome::SkippedLocked => self.skipped_locked += 1,
            CycleOutcome::NoFacilities => self.no_facilities += 1,
            CycleOutcome::Failed => self.failed += 1,
            CycleOutcome::Abandoned => self.abandoned += 1,
            CycleOutcome::Populated => self.populated += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.already_done
            + self.missing_key
            + self.skipped_locked
            + self.no_facilities
            + self.failed
            + self.abandoned
            + self.populated
            + self.crashed
    }
}
