// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::ProbeSettings;
use crate::engines::traits::{EngineError, ProbeEngine, ProbeRequest, ProbeResponse};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; qscanrs/0.1)";

/// 探测引擎
///
/// 基于reqwest实现的HTTP探测引擎。所有探测共享同一个客户端以复用连接池，
/// 并发度由验证引擎控制。
#[derive(Clone)]
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的探测引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的 User-Agent
    /// * `timeout` - 客户端级别的请求超时
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 创建成功
    /// * `Err(EngineError)` - 客户端构建失败（例如 TLS 后端初始化失败）
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// 根据探测配置创建引擎
    pub fn from_settings(settings: &ProbeSettings) -> Result<Self, EngineError> {
        Self::new(&settings.user_agent, settings.timeout())
    }
}

#[async_trait]
impl ProbeEngine for ReqwestEngine {
    /// 执行HTTP GET请求
    ///
    /// # 参数
    ///
    /// * `request` - 探测请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ProbeResponse)` - 收到的任意状态码响应
    /// * `Err(EngineError)` - 传输层错误（超时、连接失败、DNS、协议错误）
    async fn fetch(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProbeResponse {
            status_code,
            body,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
