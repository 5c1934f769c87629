// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含与外部系统交互的实现细节：
/// - 指标（metrics）：Prometheus 导出器
/// - 存储（storage）：批次文件、扫描结果与手动查询结果的读写
pub mod metrics;
pub mod storage;
