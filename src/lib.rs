// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含候选令牌、探测结果等核心实体，以及响应分类与字段提取服务
pub mod domain;

/// 引擎模块
///
/// 实现执行单次 HTTP 探测的引擎
pub mod engines;

/// 基础设施模块
///
/// 提供批次文件存储和指标导出
pub mod infrastructure;

/// 工具模块
///
/// 提供错误类型、日志初始化和输入校验
pub mod utils;

/// 工作器模块
///
/// 实现单候选探测和有界并发的批次验证
pub mod workers;
