// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::models::{Candidate, ProbeResult, RunSummary, ScanReport};
use crate::workers::aggregator::Aggregator;
use crate::workers::probe_worker::ProbeWorker;
use crate::workers::progress::{LogProgress, ProgressObserver};
use crate::utils::errors::ScanError;

/// 默认进度汇报间隔
pub const DEFAULT_PROGRESS_EVERY: usize = 1000;

/// 验证引擎
///
/// 以固定的并发上限对一个批次的候选进行探测：只有拿到信号量许可后才会
/// 准入新的探测，许可在结果交给聚合器之前一直被持有。结果按完成顺序
/// 聚合，最终按令牌排序输出。引擎总是处理完整个批次，没有提前退出，
/// 也不做重试。
pub struct VerificationEngine {
    worker: Arc<ProbeWorker>,
    progress_every: usize,
    observer: Arc<dyn ProgressObserver>,
}

impl VerificationEngine {
    pub fn new(worker: ProbeWorker) -> Self {
        Self {
            worker: Arc::new(worker),
            progress_every: DEFAULT_PROGRESS_EVERY,
            observer: Arc::new(LogProgress),
        }
    }

    /// 设置进度汇报间隔（每 N 次完成）
    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }

    /// 设置进度观察者
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 运行整个批次
    ///
    /// # 参数
    ///
    /// * `candidates` - 候选批次
    /// * `concurrency_limit` - 同时在途的探测上限
    ///
    /// # 返回值
    ///
    /// * `Ok(ScanReport)` - 排序后的有效结果与运行摘要
    /// * `Err(ScanError)` - 参数无效，引擎未启动
    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
    ) -> Result<ScanReport, ScanError> {
        self.run_until(candidates, concurrency_limit, futures::future::pending::<()>())
            .await
    }

    /// 运行批次直到完成或 `shutdown` 触发
    ///
    /// `shutdown` 触发后停止准入新的探测，等待在途探测完成或超时，
    /// 然后返回已聚合的部分结果，`summary.cancelled` 为 true。
    pub async fn run_until<F>(
        &self,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
        shutdown: F,
    ) -> Result<ScanReport, ScanError>
    where
        F: Future<Output = ()>,
    {
        if concurrency_limit == 0 {
            return Err(ScanError::InvalidConcurrency);
        }
        if self.progress_every == 0 {
            return Err(ScanError::InvalidProgressCadence);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("scan", %run_id);
        self.dispatch(run_id, candidates, concurrency_limit, shutdown)
            .instrument(span)
            .await
    }

    async fn dispatch<F>(
        &self,
        run_id: Uuid,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
        shutdown: F,
    ) -> Result<ScanReport, ScanError>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        let total = candidates.len() as u64;
        info!(
            total,
            concurrency = concurrency_limit,
            "Starting scan with {} concurrent probes",
            concurrency_limit
        );

        // tokio caps a semaphore at MAX_PERMITS
        let semaphore = Arc::new(Semaphore::new(
            concurrency_limit.min(Semaphore::MAX_PERMITS),
        ));
        let mut in_flight: JoinSet<ProbeResult> = JoinSet::new();
        let mut aggregator =
            Aggregator::new(total, self.progress_every as u64, Arc::clone(&self.observer));
        let mut dispatched: u64 = 0;
        let mut cancelled = false;
        tokio::pin!(shutdown);

        'admission: for candidate in candidates {
            // Admit only once a slot is free, draining completions meanwhile
            let permit = loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        warn!(
                            dispatched,
                            total,
                            completed = aggregator.completed(),
                            valid = aggregator.valid_count(),
                            "Shutdown requested, draining in-flight probes"
                        );
                        cancelled = true;
                        break 'admission;
                    }
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        absorb(&mut aggregator, joined);
                    }
                    permit = Arc::clone(&semaphore).acquire_owned() => {
                        break permit.map_err(|_| ScanError::PoolClosed)?;
                    }
                }
            };

            let worker = Arc::clone(&self.worker);
            dispatched += 1;
            in_flight.spawn(async move {
                let result = probe_guarded(worker, candidate).await;
                drop(permit);
                result
            });
        }

        while let Some(joined) = in_flight.join_next().await {
            absorb(&mut aggregator, joined);
        }

        let aggregated = aggregator.finish();
        let summary = RunSummary {
            run_id,
            started_at,
            total_submitted: total,
            total_dispatched: dispatched,
            total_completed: aggregated.completed,
            total_valid: aggregated.valid_results.len() as u64,
            elapsed: aggregated.elapsed,
            cancelled,
        };

        info!(
            completed = summary.total_completed,
            valid = summary.total_valid,
            cancelled,
            "Scan finished in {:.1}s ({:.1} req/s)",
            summary.elapsed.as_secs_f64(),
            summary.average_throughput()
        );

        Ok(ScanReport {
            valid_results: aggregated.valid_results,
            summary,
        })
    }
}

/// 探测并在任务边界捕获 panic，保证每个候选都产生一个结果
async fn probe_guarded(worker: Arc<ProbeWorker>, candidate: Candidate) -> ProbeResult {
    let fallback = candidate.clone();
    match AssertUnwindSafe(worker.probe(candidate)).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            error!(candidate = %fallback, "Probe panicked, recording as invalid");
            ProbeResult::invalid(fallback)
        }
    }
}

fn absorb(aggregator: &mut Aggregator, joined: Result<ProbeResult, JoinError>) {
    match joined {
        Ok(result) => aggregator.record(result),
        Err(e) => {
            error!("Probe task failed: {}", e);
            aggregator.record_lost();
        }
    }
}

#[cfg(test)]
#[path = "verification_engine_test.rs"]
mod tests;
