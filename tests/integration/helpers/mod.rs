// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use qscanrs::domain::services::classifier::ResponseClassifier;
use qscanrs::engines::reqwest_engine::{ReqwestEngine, DEFAULT_USER_AGENT};
use qscanrs::workers::ProbeWorker;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// 详情页样例，包含两个页面标记与全部字段
pub const DETAIL_PAGE: &str = r#"<html><body>
<h1>جزئیات فیلم/سریال</h1>
<div class="info">
  <div>نام: <b>  The Long Night  </b></div>
  <div>امتیاز: <b>8.4/10</b></div>
  <div>سال انتشار: <b>2019</b></div>
  <div>خلاصه: <p>A   story
     told <i>slowly</i></p></div>
</div>
</body></html>"#;

#[derive(Deserialize)]
struct PreviewQuery {
    q: String,
}

/// 按令牌返回不同响应的预览端点
///
/// - `json*`：JSON 且 `ok` 为 true
/// - `html*`：详情页
/// - `gone*`：404
/// - `slow*`：5 秒后才响应
/// - 其他：JSON 且 `ok` 为 false
async fn preview(Query(query): Query<PreviewQuery>) -> Response {
    let token = query.q;
    if token.starts_with("json") {
        let body = format!(r#"{{"ok": true, "q": "{}", "title": "Preview"}}"#, token);
        return ([("content-type", "application/json")], body).into_response();
    }
    if token.starts_with("html") {
        return ([("content-type", "text/html; charset=utf-8")], DETAIL_PAGE).into_response();
    }
    if token.starts_with("gone") {
        return (StatusCode::NOT_FOUND, DETAIL_PAGE).into_response();
    }
    if token.starts_with("slow") {
        tokio::time::sleep(Duration::from_secs(5)).await;
        return (StatusCode::OK, r#"{"ok": true}"#).into_response();
    }
    ([("content-type", "application/json")], r#"{"ok": false}"#).into_response()
}

/// 启动模拟预览服务，返回可直接追加令牌的基础 URL
pub async fn start_preview_server() -> String {
    let app = Router::new().route("/preview/", get(preview));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/preview/?i=1&q=", addr)
}

pub fn probe_worker(base_url: &str, timeout: Duration) -> ProbeWorker {
    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, timeout).unwrap();
    ProbeWorker::new(
        Arc::new(engine),
        Arc::new(ResponseClassifier::global().clone()),
        base_url,
        timeout,
    )
    .unwrap()
}
