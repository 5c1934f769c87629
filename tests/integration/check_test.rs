// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{probe_worker, start_preview_server};
use qscanrs::domain::models::{Candidate, Outcome};
use qscanrs::infrastructure::storage::{ManualInsert, ManualStore};
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_manual_check_records_valid_token_once() {
    let base_url = start_preview_server().await;
    let worker = probe_worker(&base_url, Duration::from_secs(2));
    let dir = TempDir::new().unwrap();
    let manual = ManualStore::new(dir.path().join("manual").join("generated.json"));

    let result = worker.probe(Candidate::new("htmlz")).await;
    match &result.outcome {
        Outcome::ValidHtml(details) => assert_eq!(details.year, "2019"),
        other => panic!("expected html outcome, got {:?}", other),
    }

    let record = result.to_record().unwrap();
    assert_eq!(
        manual.insert(record.clone()).await.unwrap(),
        ManualInsert::Added { total: 1 }
    );
    assert_eq!(
        manual.insert(record).await.unwrap(),
        ManualInsert::AlreadyPresent
    );
    assert_eq!(manual.load().await.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_is_invalid_even_with_markers() {
    let base_url = start_preview_server().await;
    let worker = probe_worker(&base_url, Duration::from_secs(2));

    let result = worker.probe(Candidate::new("goneq")).await;
    assert!(!result.is_valid());
    assert!(result.to_record().is_none());
}

#[tokio::test]
async fn test_slow_response_times_out_as_invalid() {
    let base_url = start_preview_server().await;
    let worker = probe_worker(&base_url, Duration::from_millis(300));

    let result = worker.probe(Candidate::new("slowq")).await;
    assert!(matches!(result.outcome, Outcome::Invalid));
}
