// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理扫描器的配置设置，包括探测端点、并发上限、页面标记和存储路径等配置
pub mod settings;
