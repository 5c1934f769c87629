// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::settings::LabelSettings;
use crate::domain::models::probe_result::{ExtractedRecord, NO_SUMMARY, UNKNOWN};
use crate::utils::errors::ExtractorError;

/// 摘要最大字符数
pub const SUMMARY_MAX_CHARS: usize = 500;
/// 摘要截断后追加的省略标记
pub const ELLIPSIS: &str = "...";

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static DEFAULT_EXTRACTOR: Lazy<FieldExtractor> = Lazy::new(|| {
    FieldExtractor::new(&FieldLabels::default()).expect("default labels are literal text")
});

/// 字段标签
///
/// 标签按字面文本匹配，会被转义后嵌入各字段的模式中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    pub name: String,
    pub rating: String,
    pub year: String,
    pub summary: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            name: "نام:".to_string(),
            rating: "امتیاز:".to_string(),
            year: "سال انتشار:".to_string(),
            summary: "خلاصه:".to_string(),
        }
    }
}

impl From<&LabelSettings> for FieldLabels {
    fn from(labels: &LabelSettings) -> Self {
        Self {
            name: labels.name.clone(),
            rating: labels.rating.clone(),
            year: labels.year.clone(),
            summary: labels.summary.clone(),
        }
    }
}

/// 字段提取器
///
/// 每个字段是一次独立的可选提取：某个字段的模式不匹配只会让该字段
/// 回退到缺省值，不影响其它字段。
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    name: Regex,
    rating: Regex,
    year: Regex,
    summary: Regex,
}

impl FieldExtractor {
    /// 根据标签编译各字段模式
    ///
    /// # 参数
    ///
    /// * `labels` - 字段标签
    ///
    /// # 返回值
    ///
    /// * `Ok(FieldExtractor)` - 编译成功
    /// * `Err(ExtractorError)` - 某个模式无法编译
    pub fn new(labels: &FieldLabels) -> Result<Self, ExtractorError> {
        Ok(Self {
            // label, one tag, then the plain-text run up to the next tag
            name: compile("name", &labels.name, r"\s*<[^>]*>([^<]+)<")?,
            rating: compile("rating", &labels.rating, r"\s*<[^>]*>(\d+(?:\.\d+)?/10)<")?,
            year: compile("year", &labels.year, r"\s*<[^>]*>(\d{4})<")?,
            summary: compile("summary", &labels.summary, r"\s*<[^>]*>(?s:(.+?))</")?,
        })
    }

    /// 使用内置本地化标签的共享实例
    pub fn global() -> &'static Self {
        &DEFAULT_EXTRACTOR
    }

    /// 从详情页 HTML 中提取记录，永不失败
    pub fn extract(&self, html: &str) -> ExtractedRecord {
        ExtractedRecord {
            name: self.extract_name(html).unwrap_or_else(|| UNKNOWN.to_string()),
            rating: self.extract_rating(html).unwrap_or_else(|| UNKNOWN.to_string()),
            year: self.extract_year(html).unwrap_or_else(|| UNKNOWN.to_string()),
            summary: self
                .extract_summary(html)
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
        }
    }

    pub fn extract_name(&self, html: &str) -> Option<String> {
        first_capture(&self.name, html)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    pub fn extract_rating(&self, html: &str) -> Option<String> {
        first_capture(&self.rating, html).map(str::to_string)
    }

    pub fn extract_year(&self, html: &str) -> Option<String> {
        first_capture(&self.year, html).map(str::to_string)
    }

    pub fn extract_summary(&self, html: &str) -> Option<String> {
        let span = first_capture(&self.summary, html)?;
        let stripped = TAG_REGEX.replace_all(span, "");
        let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
        Some(truncate_summary(collapsed.trim()))
    }
}

/// 使用内置标签提取
pub fn extract(html: &str) -> ExtractedRecord {
    FieldExtractor::global().extract(html)
}

/// 超过 [`SUMMARY_MAX_CHARS`] 个字符时截断并追加 [`ELLIPSIS`]
pub fn truncate_summary(summary: &str) -> String {
    match summary.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &summary[..cut], ELLIPSIS),
        None => summary.to_string(),
    }
}

fn compile(field: &'static str, label: &str, tail: &str) -> Result<Regex, ExtractorError> {
    let pattern = format!("{}{}", regex::escape(label), tail);
    Regex::new(&pattern).map_err(|source| ExtractorError::Pattern { field, source })
}

fn first_capture<'h>(regex: &Regex, haystack: &'h str) -> Option<&'h str> {
    regex
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
