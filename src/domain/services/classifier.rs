// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::config::settings::Settings;
use crate::domain::models::probe_result::Outcome;
use crate::domain::services::extractor::{FieldExtractor, FieldLabels};
use crate::utils::errors::ExtractorError;

static DEFAULT_CLASSIFIER: Lazy<ResponseClassifier> = Lazy::new(|| ResponseClassifier {
    markers: PageMarkers::default(),
    extractor: FieldExtractor::global().clone(),
});

/// 详情页标记
///
/// 两个字面子串，非 JSON 响应体必须同时包含二者才被视为详情页
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMarkers {
    pub detail_page: String,
    pub name_label: String,
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self {
            detail_page: "جزئیات فیلم/سریال".to_string(),
            name_label: "نام:".to_string(),
        }
    }
}

impl PageMarkers {
    pub fn matches(&self, body: &str) -> bool {
        body.contains(&self.detail_page) && body.contains(&self.name_label)
    }
}

/// 响应分类器
///
/// 纯函数式分类，不做任何 I/O。判定顺序固定为：
/// 状态码 → JSON 解析 → HTML 回退。可以解析为 JSON 但缺少成功标记的
/// 响应体不会再按 HTML 解释，即使其中恰好包含标记子串。
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    markers: PageMarkers,
    extractor: FieldExtractor,
}

impl ResponseClassifier {
    pub fn new(markers: PageMarkers, extractor: FieldExtractor) -> Self {
        Self { markers, extractor }
    }

    /// 根据配置中的标记和标签构建分类器
    pub fn from_settings(settings: &Settings) -> Result<Self, ExtractorError> {
        let markers = PageMarkers {
            detail_page: settings.markers.detail_page.clone(),
            name_label: settings.markers.name_label.clone(),
        };
        let extractor = FieldExtractor::new(&FieldLabels::from(&settings.labels))?;
        Ok(Self::new(markers, extractor))
    }

    /// 使用内置本地化标记的共享实例
    pub fn global() -> &'static Self {
        &DEFAULT_CLASSIFIER
    }

    /// 对一次 HTTP 响应进行分类
    ///
    /// # 参数
    ///
    /// * `status_code` - HTTP 状态码
    /// * `body` - 响应体文本
    ///
    /// # 返回值
    ///
    /// 分类结果，失败情况以 `Outcome::Invalid` 表示
    pub fn classify(&self, status_code: u16, body: &str) -> Outcome {
        if status_code != 200 {
            return Outcome::Invalid;
        }

        let body = body.trim();

        match serde_json::from_str::<Value>(body) {
            Ok(payload) => {
                if payload.get("ok") == Some(&Value::Bool(true)) {
                    Outcome::ValidJson(payload)
                } else {
                    Outcome::Invalid
                }
            }
            Err(_) if self.markers.matches(body) => {
                Outcome::ValidHtml(self.extractor.extract(body))
            }
            Err(_) => Outcome::Invalid,
        }
    }
}

/// 使用内置标记分类
pub fn classify(status_code: u16, body: &str) -> Outcome {
    ResponseClassifier::global().classify(status_code, body)
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
