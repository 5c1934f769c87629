// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::models::probe_result::ProbeResult;

/// 运行摘要
///
/// 只由验证引擎的聚合路径写入，运行结束时定稿后对调用方只读。
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// 运行标识，与日志 span 中的 `run_id` 一致
    pub run_id: Uuid,
    /// 运行开始时间
    pub started_at: DateTime<Utc>,
    /// 批次中的候选总数
    pub total_submitted: u64,
    /// 实际被准入探测的候选数
    pub total_dispatched: u64,
    /// 已产生结果的候选数
    pub total_completed: u64,
    /// 有效结果数
    pub total_valid: u64,
    /// 总耗时
    pub elapsed: Duration,
    /// 是否因外部中断而提前停止准入
    pub cancelled: bool,
}

impl RunSummary {
    /// 平均吞吐量（每秒完成数）
    pub fn average_throughput(&self) -> f64 {
        throughput(self.total_completed, self.elapsed)
    }
}

/// 进度观测快照
///
/// 计数器单调递增，吞吐量为截至当前的平均速度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: u64,
    pub total: u64,
    pub valid: u64,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    pub fn throughput(&self) -> f64 {
        throughput(self.completed, self.elapsed)
    }

    pub fn is_final(&self) -> bool {
        self.completed == self.total
    }
}

fn throughput(completed: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        completed as f64 / secs
    } else {
        0.0
    }
}

/// 一次扫描的完整产出
///
/// `valid_results` 按令牌字典序升序排列且没有重复令牌
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub valid_results: Vec<ProbeResult>,
    pub summary: RunSummary,
}
