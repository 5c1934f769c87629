// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含扫描器中不做 I/O 的纯逻辑：
/// - 响应分类（classifier）：把状态码和响应体映射为分类结果
/// - 字段提取（extractor）：从本地化详情页中尽力提取结构化字段
/// - 候选空间（candidate_space）：按字典序枚举定长令牌
pub mod candidate_space;
pub mod classifier;
pub mod extractor;

pub use classifier::{classify, PageMarkers, ResponseClassifier};
pub use extractor::{extract, FieldExtractor, FieldLabels};
