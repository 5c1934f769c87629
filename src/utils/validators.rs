// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::{BatchError, ScanError};
use url::Url;

/// 验证基础 URL
///
/// 候选令牌直接拼接在基础 URL 之后，因此这里只要求它是一个
/// 带有 http/https 方案和主机名的绝对 URL。
///
/// # 参数
///
/// * `base_url` - 基础 URL 字符串
///
/// # 返回值
///
/// * `Ok(())` - URL 有效
/// * `Err(ScanError)` - URL 无法解析或方案不受支持
pub fn validate_base_url(base_url: &str) -> Result<(), ScanError> {
    let invalid = |reason: String| ScanError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }

    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(())
}

/// 验证手动输入的令牌
///
/// 令牌必须恰好为 `expected_len` 个 ASCII 字母或数字。
pub fn validate_token(token: &str, expected_len: usize) -> Result<(), BatchError> {
    if token.chars().count() != expected_len {
        return Err(BatchError::InvalidToken(format!(
            "'{}' must be exactly {} characters",
            token, expected_len
        )));
    }

    if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BatchError::InvalidToken(format!(
            "'{}' must be alphanumeric",
            token
        )));
    }

    Ok(())
}
