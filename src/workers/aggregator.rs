// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::models::{ProbeResult, ProgressSnapshot};
use crate::workers::progress::ProgressObserver;

/// 结果聚合器
///
/// 扫描中唯一的写入点：由调度循环独占持有，按完成顺序接收结果。
/// 无效结果只计数不保存，内存占用与有效结果数成正比。
pub struct Aggregator {
    total: u64,
    progress_every: u64,
    observer: Arc<dyn ProgressObserver>,
    started: Instant,
    completed: u64,
    valid_count: u64,
    valid: Vec<ProbeResult>,
    last_reported: Option<u64>,
}

/// 聚合完成后的产出
#[derive(Debug)]
pub struct Aggregated {
    /// 按令牌升序排列、去重后的有效结果
    pub valid_results: Vec<ProbeResult>,
    pub completed: u64,
    pub elapsed: Duration,
}

impl Aggregator {
    /// 创建聚合器
    ///
    /// `progress_every` 为 0 时按 1 处理
    pub fn new(total: u64, progress_every: u64, observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            total,
            progress_every: progress_every.max(1),
            observer,
            started: Instant::now(),
            completed: 0,
            valid_count: 0,
            valid: Vec::new(),
            last_reported: None,
        }
    }

    /// 记录一个完成的探测结果
    pub fn record(&mut self, result: ProbeResult) {
        if result.is_valid() {
            counter!("probe_valid_total", "type" => result.outcome.kind()).increment(1);
            self.valid_count += 1;
            self.valid.push(result);
        }
        self.complete_one();
    }

    /// 记录一个没有产出结果的完成（任务在运行时层面丢失）
    pub fn record_lost(&mut self) {
        self.complete_one();
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn valid_count(&self) -> u64 {
        self.valid_count
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            valid: self.valid_count,
            elapsed: self.started.elapsed(),
        }
    }

    /// 结束聚合
    ///
    /// 若最后一次完成尚未汇报（例如运行被中断），在这里补发一次。
    pub fn finish(mut self) -> Aggregated {
        if self.completed > 0 && self.last_reported != Some(self.completed) {
            self.report();
        }

        let mut valid_results = self.valid;
        valid_results.sort_by(|a, b| a.candidate.cmp(&b.candidate));
        valid_results.dedup_by(|a, b| a.candidate == b.candidate);

        Aggregated {
            valid_results,
            completed: self.completed,
            elapsed: self.started.elapsed(),
        }
    }

    fn complete_one(&mut self) {
        self.completed += 1;
        counter!("scan_candidates_completed_total").increment(1);

        if self.completed % self.progress_every == 0 || self.completed == self.total {
            self.report();
        }
    }

    fn report(&mut self) {
        self.last_reported = Some(self.completed);
        self.observer.on_progress(&self.snapshot());
    }
}
