// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::domain::models::{Candidate, Outcome, ProbeResult};
use crate::domain::services::classifier::ResponseClassifier;
use crate::engines::traits::{EngineError, ProbeEngine, ProbeRequest};
use crate::utils::errors::ScanError;
use crate::utils::validators;

/// 探测工作器
///
/// 对单个候选发出一次 GET 请求并分类响应。所有传输层失败在这里被吸收为
/// `Outcome::Invalid`，永远不会向上传播。
#[derive(Clone)]
pub struct ProbeWorker {
    engine: Arc<dyn ProbeEngine>,
    classifier: Arc<ResponseClassifier>,
    base_url: String,
    timeout: Duration,
}

impl ProbeWorker {
    /// 创建新的探测工作器
    ///
    /// # 参数
    ///
    /// * `engine` - 执行请求的探测引擎
    /// * `classifier` - 响应分类器
    /// * `base_url` - 基础 URL，候选令牌直接追加在其后
    /// * `timeout` - 单次请求超时
    ///
    /// # 返回值
    ///
    /// * `Ok(ProbeWorker)` - 创建成功
    /// * `Err(ScanError)` - 基础 URL 无效
    pub fn new(
        engine: Arc<dyn ProbeEngine>,
        classifier: Arc<ResponseClassifier>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ScanError> {
        let base_url = base_url.into();
        validators::validate_base_url(&base_url)?;

        Ok(Self {
            engine,
            classifier,
            base_url,
            timeout,
        })
    }

    pub fn url_for(&self, candidate: &Candidate) -> String {
        format!("{}{}", self.base_url, candidate.as_str())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 探测单个候选
    ///
    /// 无论引擎是否遵守超时，这里都会在 `timeout` 之后放弃等待。
    pub async fn probe(&self, candidate: Candidate) -> ProbeResult {
        let request = ProbeRequest {
            url: self.url_for(&candidate),
            timeout: self.timeout,
        };

        counter!("probe_requests_total").increment(1);
        let start = Instant::now();
        let fetched = tokio::time::timeout(self.timeout, self.engine.fetch(&request))
            .await
            .unwrap_or_else(|_| Err(EngineError::Timeout(self.timeout)));
        histogram!("probe_duration_seconds").record(start.elapsed().as_secs_f64());

        let outcome = match fetched {
            Ok(response) => {
                trace!(
                    candidate = %candidate,
                    status = response.status_code,
                    response_time_ms = response.response_time_ms,
                    "Probe answered"
                );
                self.classifier
                    .classify(response.status_code, &response.body)
            }
            Err(e) => {
                let kind = if e.is_timeout() { "timeout" } else { "transport" };
                counter!("probe_transport_errors_total", "kind" => kind).increment(1);
                debug!(candidate = %candidate, error = %e, "Probe failed");
                Outcome::Invalid
            }
        };

        ProbeResult::new(candidate, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::traits::ProbeResponse;
    use async_trait::async_trait;

    struct FixedEngine {
        status_code: u16,
        body: &'static str,
    }

    #[async_trait]
    impl ProbeEngine for FixedEngine {
        async fn fetch(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
            assert!(request.url.starts_with("http://probe.test/?q="));
            Ok(ProbeResponse {
                status_code: self.status_code,
                body: self.body.to_string(),
                response_time_ms: 1,
            })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl ProbeEngine for FailingEngine {
        async fn fetch(&self, _request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
            Err(EngineError::Other("connection refused".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct HangingEngine;

    #[async_trait]
    impl ProbeEngine for HangingEngine {
        async fn fetch(&self, _request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
            futures::future::pending().await
        }

        fn name(&self) -> &'static str {
            "hanging"
        }
    }

    fn worker(engine: Arc<dyn ProbeEngine>) -> ProbeWorker {
        ProbeWorker::new(
            engine,
            Arc::new(ResponseClassifier::global().clone()),
            "http://probe.test/?q=",
            Duration::from_secs(10),
        )
        .unwrap()
    }

    #[test]
    fn test_url_is_base_plus_token() {
        let worker = worker(Arc::new(FailingEngine));
        assert_eq!(
            worker.url_for(&Candidate::new("abcde")),
            "http://probe.test/?q=abcde"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ProbeWorker::new(
            Arc::new(FailingEngine),
            Arc::new(ResponseClassifier::global().clone()),
            "probe.test",
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(ScanError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_probe_classifies_response() {
        let worker = worker(Arc::new(FixedEngine {
            status_code: 200,
            body: r#"{"ok": true, "id": 7}"#,
        }));
        let result = worker.probe(Candidate::new("abcde")).await;

        assert_eq!(result.candidate.as_str(), "abcde");
        assert!(matches!(result.outcome, Outcome::ValidJson(_)));
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_invalid() {
        let worker = worker(Arc::new(FailingEngine));
        let result = worker.probe(Candidate::new("zzzzz")).await;
        assert_eq!(result, ProbeResult::invalid(Candidate::new("zzzzz")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_engine_is_cut_off_by_timeout() {
        let worker = worker(Arc::new(HangingEngine));
        let result = worker.probe(Candidate::new("hangs")).await;
        assert_eq!(result.outcome, Outcome::Invalid);
    }
}
