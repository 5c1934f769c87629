// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 候选令牌
///
/// 由外部生成的定长字符串，在一次运行中恰好被消费一次。
/// 排序按字典序进行，用于产生确定性的输出顺序。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 批次文件中的单个条目
///
/// 生成器写出 `{"q": "...", "checked": false}`，读取时 `checked` 可省略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub q: String,
    #[serde(default)]
    pub checked: bool,
}

impl BatchEntry {
    pub fn unchecked(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            checked: false,
        }
    }
}

impl From<BatchEntry> for Candidate {
    fn from(entry: BatchEntry) -> Self {
        Candidate(entry.q)
    }
}
