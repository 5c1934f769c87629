// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供探测执行和批次调度功能
/// 包括单候选探测、结果聚合、进度汇报和有界并发的验证引擎
pub mod aggregator;
pub mod probe_worker;
pub mod progress;
pub mod verification_engine;

pub use probe_worker::ProbeWorker;
pub use progress::{LogProgress, NoProgress, ProgressObserver};
pub use verification_engine::VerificationEngine;
