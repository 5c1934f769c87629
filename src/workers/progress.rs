// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

use crate::domain::models::ProgressSnapshot;

/// 进度观察者
///
/// 验证引擎只负责按节奏产出快照，如何展示由观察者决定
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, snapshot: &ProgressSnapshot);
}

/// 通过 tracing 输出进度
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        if snapshot.is_final() {
            info!(
                completed = snapshot.completed,
                valid = snapshot.valid,
                "All {} candidates checked in {:.1}s | Success: {}",
                snapshot.total,
                snapshot.elapsed.as_secs_f64(),
                snapshot.valid
            );
            return;
        }

        info!(
            completed = snapshot.completed,
            total = snapshot.total,
            valid = snapshot.valid,
            "Progress: {}/{} | Speed: {:.1} req/s | Success: {}",
            snapshot.completed,
            snapshot.total,
            snapshot.throughput(),
            snapshot.valid
        );
    }
}

/// 丢弃所有进度
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _snapshot: &ProgressSnapshot) {}
}
