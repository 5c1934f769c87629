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

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qscanrs::config::settings::Settings;
use qscanrs::domain::models::{Candidate, Outcome, ScanReport};
use qscanrs::domain::services::candidate_space::CandidateSpace;
use qscanrs::domain::services::classifier::ResponseClassifier;
use qscanrs::engines::reqwest_engine::ReqwestEngine;
use qscanrs::infrastructure::metrics;
use qscanrs::infrastructure::storage::{BatchPlan, BatchStore, ManualInsert, ManualStore};
use qscanrs::utils::{telemetry, validators};
use qscanrs::workers::{ProbeWorker, VerificationEngine};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "qscanrs",
    about = "Brute-force verification of preview tokens",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every token of an input batch and write the valid ones
    Scan {
        /// Batch number, reads q-generated-{n}.json
        file_number: u32,
        /// Maximum number of in-flight probes
        #[arg(long)]
        concurrency: Option<usize>,
        /// Base URL the token is appended to
        #[arg(long)]
        base_url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Report progress every N completions
        #[arg(long)]
        progress_every: Option<usize>,
    },
    /// Probe a single token and keep it in the manual results file
    Check {
        /// Token to probe
        token: String,
    },
    /// Enumerate the whole token space into batch files
    Generate,
}

/// 主函数
///
/// 初始化日志与配置后分发到对应子命令
#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    let mut settings = Settings::new().context("Failed to load configuration")?;

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.listen_addr)
            .context("Failed to start metrics exporter")?;
    }

    match cli.command {
        Commands::Scan {
            file_number,
            concurrency,
            base_url,
            timeout_secs,
            progress_every,
        } => {
            if let Some(concurrency) = concurrency {
                settings.scan.concurrency = concurrency;
            }
            if let Some(base_url) = base_url {
                settings.probe.base_url = base_url;
            }
            if let Some(timeout_secs) = timeout_secs {
                settings.probe.timeout_secs = timeout_secs;
            }
            if let Some(progress_every) = progress_every {
                settings.scan.progress_every = progress_every;
            }
            scan(&settings, file_number).await
        }
        Commands::Check { token } => check(&settings, &token).await,
        Commands::Generate => generate(&settings).await,
    }
}

fn build_worker(settings: &Settings) -> Result<ProbeWorker> {
    let engine = ReqwestEngine::from_settings(&settings.probe)
        .context("Failed to build HTTP client")?;
    let classifier =
        ResponseClassifier::from_settings(settings).context("Failed to build classifier")?;

    let worker = ProbeWorker::new(
        Arc::new(engine),
        Arc::new(classifier),
        settings.probe.base_url.clone(),
        settings.probe.timeout(),
    )?;
    Ok(worker)
}

async fn scan(settings: &Settings, file_number: u32) -> Result<()> {
    let store = BatchStore::from_settings(&settings.storage);
    let candidates = store
        .load_batch(file_number)
        .await
        .with_context(|| format!("Failed to load batch {}", file_number))?;

    let engine = VerificationEngine::new(build_worker(settings)?)
        .with_progress_every(settings.scan.progress_every);

    info!(
        "Loaded {} tokens from {}",
        candidates.len(),
        store.input_path(file_number).display()
    );

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, draining in-flight probes");
        }
    };
    let report = engine
        .run_until(candidates, settings.scan.concurrency, shutdown)
        .await?;

    let output = store
        .save_results(file_number, &report.valid_results)
        .await
        .context("Failed to write results")?;
    log_summary(&report, &output);
    Ok(())
}

fn log_summary(report: &ScanReport, output: &Path) {
    let summary = &report.summary;
    info!("Saved {} valid tokens to {}", summary.total_valid, output.display());
    info!(
        run_id = %summary.run_id,
        completed = summary.total_completed,
        submitted = summary.total_submitted,
        cancelled = summary.cancelled,
        "Total time: {:.2}s | Average speed: {:.1} req/s",
        summary.elapsed.as_secs_f64(),
        summary.average_throughput()
    );
}

async fn check(settings: &Settings, token: &str) -> Result<()> {
    validators::validate_token(token, settings.generator.token_length)?;

    let worker = build_worker(settings)?;
    let result = worker.probe(Candidate::new(token)).await;

    let record = match result.to_record() {
        Some(record) => record,
        None => {
            println!("{}: invalid", token);
            return Ok(());
        }
    };

    println!("{}: valid", token);
    println!("  Name: {}", record.details_name());
    match &result.outcome {
        Outcome::ValidHtml(details) => {
            println!("  Rating: {}", details.rating);
            println!("  Year: {}", details.year);
        }
        Outcome::ValidJson(payload) => println!("  {}", payload),
        Outcome::Invalid => {}
    }

    let manual = ManualStore::from_settings(&settings.storage);
    match manual
        .insert(record)
        .await
        .context("Failed to update manual results")?
    {
        ManualInsert::Added { total } => info!(
            "Saved to {} ({} entries)",
            manual.path().display(),
            total
        ),
        ManualInsert::AlreadyPresent => info!("{} is already in {}", token, manual.path().display()),
    }
    Ok(())
}

async fn generate(settings: &Settings) -> Result<()> {
    let generator = &settings.generator;
    let space = CandidateSpace::new(&generator.alphabet, generator.token_length);
    let plan = BatchPlan::from_settings(generator);

    match space.size() {
        Some(size) => info!(
            "Generating {} tokens, about {} per file",
            size, plan.items_per_file
        ),
        None => warn!("Token space is too large to count"),
    }

    let store = BatchStore::from_settings(&settings.storage);
    let started = tokio::time::Instant::now();
    let written = store
        .write_batches(&space, plan)
        .await
        .context("Failed to write batch files")?;

    let elapsed: Duration = started.elapsed();
    info!(
        "Done: {} files in {:.2}s",
        written.len(),
        elapsed.as_secs_f64()
    );
    Ok(())
}
