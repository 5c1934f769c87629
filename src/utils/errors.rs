// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

/// 批次文件错误类型
///
/// 批次加载失败在任何探测开始之前终止整个运行
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("批次文件不存在: {0}")]
    NotFound(PathBuf),

    #[error("读写文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 格式错误 {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("无效令牌: {0}")]
    InvalidToken(String),
}

impl BatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}

/// 扫描错误类型
///
/// 仅包含运行级别的致命条件，单个候选的失败不会出现在这里
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("并发上限必须大于 0")]
    InvalidConcurrency,

    #[error("进度汇报间隔必须大于 0")]
    InvalidProgressCadence,

    #[error("无效的基础 URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("工作池已关闭")]
    PoolClosed,
}

/// 字段提取器错误类型
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("无法编译 {field} 字段模式: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// 指标导出器错误类型
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("无效的监听地址 {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("无法安装 Prometheus 导出器: {0}")]
    Install(#[from] metrics_exporter_prometheus::BuildError),
}
