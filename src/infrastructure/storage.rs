// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::settings::{GeneratorSettings, StorageSettings};
use crate::domain::models::{BatchEntry, Candidate, ProbeResult, SuccessRecord};
use crate::domain::services::candidate_space::CandidateSpace;
use crate::utils::errors::BatchError;

/// 批次文件存储
///
/// 输入批次为 `{input_dir}/q-generated-{n}.json`，扫描结果写入
/// `{output_dir}/q-success-{n}.json`
#[derive(Debug, Clone)]
pub struct BatchStore {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

/// 批次切分方案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// 每个文件的最大条目数
    pub items_per_file: usize,
    /// 每个文件的目标字节数，达到后提前切分
    pub target_bytes: usize,
}

impl BatchPlan {
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let target_bytes = settings.target_file_mb.saturating_mul(1024 * 1024);
        let items_per_file = target_bytes / settings.bytes_per_item.max(1);
        Self {
            items_per_file: usize::try_from(items_per_file).unwrap_or(usize::MAX).max(1),
            target_bytes: usize::try_from(target_bytes).unwrap_or(usize::MAX).max(1),
        }
    }
}

/// 已写出的批次文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBatch {
    pub index: u32,
    pub path: PathBuf,
    pub items: usize,
    pub bytes: usize,
}

impl BatchStore {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.input_dir, &settings.output_dir)
    }

    pub fn input_path(&self, index: u32) -> PathBuf {
        self.input_dir.join(format!("q-generated-{}.json", index))
    }

    pub fn output_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(format!("q-success-{}.json", index))
    }

    /// 加载输入批次
    ///
    /// # 参数
    ///
    /// * `index` - 批次编号
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Candidate>)` - 按文件顺序排列的候选
    /// * `Err(BatchError)` - 文件不存在、无法读取或不是合法的条目数组
    pub async fn load_batch(&self, index: u32) -> Result<Vec<Candidate>, BatchError> {
        let path = self.input_path(index);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BatchError::NotFound(path))
            }
            Err(e) => return Err(BatchError::io(path, e)),
        };

        let entries: Vec<BatchEntry> =
            serde_json::from_slice(&raw).map_err(|e| BatchError::malformed(&path, e))?;

        info!(path = %path.display(), count = entries.len(), "Loaded batch");
        Ok(entries.into_iter().map(Candidate::from).collect())
    }

    /// 写出有效结果，按令牌升序排列
    pub async fn save_results(
        &self,
        index: u32,
        results: &[ProbeResult],
    ) -> Result<PathBuf, BatchError> {
        let mut records: Vec<SuccessRecord> =
            results.iter().filter_map(ProbeResult::to_record).collect();
        records.sort_by(|a, b| a.q.cmp(&b.q));

        let path = self.output_path(index);
        write_json(&path, &records).await?;
        Ok(path)
    }

    /// 将候选空间切分写出为批次文件
    ///
    /// 文件编号从 1 开始，条目按字典序排列且 `checked` 为 false。
    pub async fn write_batches(
        &self,
        space: &CandidateSpace,
        plan: BatchPlan,
    ) -> Result<Vec<WrittenBatch>, BatchError> {
        fs::create_dir_all(&self.input_dir)
            .await
            .map_err(|e| BatchError::io(&self.input_dir, e))?;

        let mut written = Vec::new();
        let mut chunk: Vec<String> = Vec::new();
        let mut chunk_bytes = 0usize;

        for candidate in space.iter() {
            let line = serde_json::to_string(&BatchEntry::unchecked(candidate.into_inner()))
                .map_err(|e| BatchError::malformed(&self.input_dir, e))?;
            // each entry is followed by ",\n" in the file
            chunk_bytes += line.len() + 2;
            chunk.push(line);

            if chunk.len() >= plan.items_per_file || chunk_bytes >= plan.target_bytes {
                written.push(self.flush_chunk(written.len() as u32 + 1, &chunk).await?);
                chunk.clear();
                chunk_bytes = 0;
            }
        }

        if !chunk.is_empty() {
            written.push(self.flush_chunk(written.len() as u32 + 1, &chunk).await?);
        }

        Ok(written)
    }

    async fn flush_chunk(&self, index: u32, chunk: &[String]) -> Result<WrittenBatch, BatchError> {
        let content = format!("[\n{}\n]\n", chunk.join(",\n"));
        let path = self.input_path(index);
        fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| BatchError::io(&path, e))?;

        info!(
            path = %path.display(),
            items = chunk.len(),
            "Saved batch ({:.2} MB)",
            content.len() as f64 / (1024.0 * 1024.0)
        );

        Ok(WrittenBatch {
            index,
            path,
            items: chunk.len(),
            bytes: content.len(),
        })
    }
}

/// 手动查询结果存储
///
/// 追加写入，不保存重复令牌，文件始终按令牌排序
#[derive(Debug, Clone)]
pub struct ManualStore {
    path: PathBuf,
}

/// 手动插入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualInsert {
    Added { total: usize },
    AlreadyPresent,
}

impl ManualStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.manual_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取已有记录
    ///
    /// 文件缺失、为空或已损坏时视为空列表
    pub async fn load(&self) -> Vec<SuccessRecord> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read manual results");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupted manual results, starting fresh"
                );
                Vec::new()
            }
        }
    }

    /// 插入一条记录，已存在相同令牌时不做修改
    pub async fn insert(&self, record: SuccessRecord) -> Result<ManualInsert, BatchError> {
        let mut records = self.load().await;
        if records.iter().any(|existing| existing.q == record.q) {
            return Ok(ManualInsert::AlreadyPresent);
        }

        records.push(record);
        records.sort_by(|a, b| a.q.cmp(&b.q));
        write_json(&self.path, &records).await?;

        Ok(ManualInsert::Added {
            total: records.len(),
        })
    }
}

async fn write_json(path: &Path, records: &[SuccessRecord]) -> Result<(), BatchError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BatchError::io(parent, e))?;
        }
    }

    let content = serde_json::to_vec_pretty(records).map_err(|e| BatchError::malformed(path, e))?;
    fs::write(path, content)
        .await
        .map_err(|e| BatchError::io(path, e))
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
