// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::{ReqwestEngine, DEFAULT_USER_AGENT};
use crate::engines::traits::{ProbeEngine, ProbeRequest};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;

async fn start_test_server() -> String {
    let app = Router::new()
        .route(
            "/ok",
            get(|| async {
                Response::builder()
                    .header("content-type", "application/json")
                    .body(r#"{"ok": true}"#.to_string())
                    .unwrap()
            }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not here").into_response() }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn request(url: String, timeout: Duration) -> ProbeRequest {
    ProbeRequest { url, timeout }
}

#[tokio::test]
async fn test_reqwest_engine_returns_status_and_body() {
    let server_url = start_test_server().await;
    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap();

    let response = engine
        .fetch(&request(format!("{}/ok", server_url), Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"ok": true}"#);
}

#[tokio::test]
async fn test_reqwest_engine_non_200_is_not_an_error() {
    let server_url = start_test_server().await;
    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap();

    let response = engine
        .fetch(&request(
            format!("{}/missing", server_url),
            Duration::from_secs(10),
        ))
        .await
        .unwrap();

    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn test_reqwest_engine_timeout() {
    let server_url = start_test_server().await;
    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap();

    let result = engine
        .fetch(&request(
            format!("{}/slow", server_url),
            Duration::from_millis(200),
        ))
        .await;

    let err = result.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_reqwest_engine_connection_refused() {
    // bind then drop to obtain a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(2)).unwrap();
    let result = engine
        .fetch(&request(format!("http://{}/", addr), Duration::from_secs(2)))
        .await;

    assert!(result.is_err());
}

#[test]
fn test_reqwest_engine_name() {
    let engine = ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(1)).unwrap();
    assert_eq!(engine.name(), "reqwest");
}
