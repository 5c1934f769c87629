// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{probe_worker, start_preview_server};
use qscanrs::domain::models::{Candidate, SuccessDetails, SuccessRecord};
use qscanrs::infrastructure::storage::BatchStore;
use qscanrs::workers::{NoProgress, VerificationEngine};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_scan_batch_end_to_end() {
    let base_url = start_preview_server().await;
    let dir = TempDir::new().unwrap();
    let store = BatchStore::new(dir.path().join("in"), dir.path().join("out"));

    tokio::fs::create_dir_all(dir.path().join("in")).await.unwrap();
    tokio::fs::write(
        store.input_path(3),
        r#"[
  {"q": "htmla", "checked": false},
  {"q": "nopea", "checked": false},
  {"q": "jsonb", "checked": false},
  {"q": "gonea", "checked": false},
  {"q": "slowa", "checked": false},
  {"q": "jsona", "checked": false}
]"#,
    )
    .await
    .unwrap();

    let candidates = store.load_batch(3).await.unwrap();
    let engine = VerificationEngine::new(probe_worker(&base_url, Duration::from_secs(1)))
        .with_progress_every(2)
        .with_observer(Arc::new(NoProgress));

    let report = engine.run(candidates, 4).await.unwrap();
    assert_eq!(report.summary.total_submitted, 6);
    assert_eq!(report.summary.total_completed, 6);
    assert_eq!(report.summary.total_valid, 3);
    assert!(!report.summary.cancelled);

    let output = store.save_results(3, &report.valid_results).await.unwrap();
    let text = tokio::fs::read_to_string(&output).await.unwrap();
    let records: Vec<SuccessRecord> = serde_json::from_str(&text).unwrap();

    let tokens: Vec<&str> = records.iter().map(|r| r.q.as_str()).collect();
    assert_eq!(tokens, vec!["htmla", "jsona", "jsonb"]);

    match &records[0].details {
        SuccessDetails::Html(details) => {
            assert_eq!(details.name, "The Long Night");
            assert_eq!(details.rating, "8.4/10");
            assert_eq!(details.year, "2019");
            assert_eq!(details.summary, "A story told slowly");
        }
        other => panic!("expected html details, got {:?}", other),
    }
    match &records[1].details {
        SuccessDetails::Json(payload) => assert_eq!(payload["q"], "jsona"),
        other => panic!("expected json details, got {:?}", other),
    }

    // the raw file keeps the tagged layout and non-ASCII text
    assert!(text.contains(r#""type": "html""#));
    assert!(text.contains(r#""status": "active""#));
}

#[tokio::test]
async fn test_unreachable_host_yields_empty_result() {
    // nothing listens on the discard port
    let worker = probe_worker("http://127.0.0.1:9/preview/?i=1&q=", Duration::from_secs(2));
    let engine = VerificationEngine::new(worker).with_observer(Arc::new(NoProgress));

    let candidates = ["aaaaa", "aaaab", "aaaac"]
        .iter()
        .map(|t| Candidate::new(*t))
        .collect();
    let report = engine.run(candidates, 2).await.unwrap();

    assert_eq!(report.summary.total_completed, 3);
    assert!(report.valid_results.is_empty());
}
