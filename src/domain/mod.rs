// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含扫描器的核心数据结构与纯逻辑，包括：
/// - 领域模型（models）：候选、探测结果与运行摘要
/// - 服务（services）：响应分类、字段提取和候选空间枚举
///
/// 领域层不依赖任何网络或文件系统实现。
pub mod models;
pub mod services;
