// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了扫描器的核心数据结构，包括：
/// - 候选令牌（candidate）：待验证的定长令牌及批次条目
/// - 探测结果（probe_result）：分类结果、提取记录与输出记录
/// - 运行摘要（run_summary）：计数器、进度快照与扫描报告
pub mod candidate;
pub mod probe_result;
pub mod run_summary;

pub use candidate::{BatchEntry, Candidate};
pub use probe_result::{ExtractedRecord, Outcome, ProbeResult, SuccessDetails, SuccessRecord};
pub use run_summary::{ProgressSnapshot, RunSummary, ScanReport};
