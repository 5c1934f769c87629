// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::candidate::Candidate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 字段缺省值
pub const UNKNOWN: &str = "Unknown";
/// 摘要缺省值
pub const NO_SUMMARY: &str = "No summary available";

/// 从详情页中提取出的结构化记录
///
/// 每个字段独立地回退到缺省值，部分提取依然视为成功。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub name: String,
    pub rating: String,
    pub year: String,
    pub summary: String,
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            rating: UNKNOWN.to_string(),
            year: UNKNOWN.to_string(),
            summary: NO_SUMMARY.to_string(),
        }
    }
}

/// 单次探测的分类结果
///
/// `Invalid` 是正常的结果分支而不是错误信号
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 非 200、传输失败、`ok` 不为 true 或不是详情页
    Invalid,
    /// JSON 状态对象且 `ok == true`，原样保留
    ValidJson(Value),
    /// 本地化的 HTML 详情页
    ValidHtml(ExtractedRecord),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Outcome::Invalid)
    }

    /// 结果类型标签，用于指标和日志
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Invalid => "invalid",
            Outcome::ValidJson(_) => "json",
            Outcome::ValidHtml(_) => "html",
        }
    }
}

/// 探测结果
///
/// 每个提交的候选恰好产生一个探测结果
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub candidate: Candidate,
    pub outcome: Outcome,
}

impl ProbeResult {
    pub fn new(candidate: Candidate, outcome: Outcome) -> Self {
        Self { candidate, outcome }
    }

    pub fn invalid(candidate: Candidate) -> Self {
        Self::new(candidate, Outcome::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// 转换为输出记录，无效结果返回 `None`
    pub fn to_record(&self) -> Option<SuccessRecord> {
        let details = match &self.outcome {
            Outcome::Invalid => return None,
            Outcome::ValidJson(payload) => SuccessDetails::Json(payload.clone()),
            Outcome::ValidHtml(record) => SuccessDetails::Html(record.clone()),
        };

        Some(SuccessRecord {
            q: self.candidate.as_str().to_string(),
            status: ACTIVE.to_string(),
            details,
        })
    }
}

const ACTIVE: &str = "active";

/// 成功记录的详情
///
/// 序列化为相邻标签形式：`"type": "json" | "html"` 与 `"details": ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "lowercase")]
pub enum SuccessDetails {
    Json(Value),
    Html(ExtractedRecord),
}

/// 输出文件中的一条有效记录
///
/// `{ "q": token, "status": "active", "type": ..., "details": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRecord {
    pub q: String,
    pub status: String,
    #[serde(flatten)]
    pub details: SuccessDetails,
}

impl SuccessRecord {
    /// 记录中的名称：HTML 取提取出的名称，JSON 取 `name` 字段
    pub fn details_name(&self) -> &str {
        match &self.details {
            SuccessDetails::Html(record) => &record.name,
            SuccessDetails::Json(payload) => payload
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN),
        }
    }
}
