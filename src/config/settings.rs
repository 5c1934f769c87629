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

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含探测、扫描、页面标记、字段标签、存储、生成器和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 探测配置
    pub probe: ProbeSettings,
    /// 扫描配置
    pub scan: ScanSettings,
    /// 详情页标记
    pub markers: MarkerSettings,
    /// 字段提取标签
    pub labels: LabelSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 候选生成配置
    pub generator: GeneratorSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 探测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// 基础 URL，令牌直接追加在其后
    pub base_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 扫描配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// 同时在途的探测上限
    pub concurrency: usize,
    /// 每完成多少个候选汇报一次进度
    pub progress_every: usize,
}

/// 详情页标记设置
///
/// 两个子串同时出现时，非 JSON 响应体才被视为有效详情页
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerSettings {
    /// “影片/剧集详情”标记
    pub detail_page: String,
    /// “名称:”标记
    pub name_label: String,
}

/// 字段提取标签设置
#[derive(Debug, Clone, Deserialize)]
pub struct LabelSettings {
    pub name: String,
    pub rating: String,
    pub year: String,
    pub summary: String,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 输入批次目录
    pub input_dir: String,
    /// 扫描结果目录
    pub output_dir: String,
    /// 手动查询结果文件
    pub manual_file: String,
}

/// 候选生成配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    /// 令牌字母表
    pub alphabet: String,
    /// 令牌长度
    pub token_length: usize,
    /// 单个批次文件的目标大小（MB）
    pub target_file_mb: u64,
    /// 每个条目的估算字节数
    pub bytes_per_item: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `QSCAN__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("QSCAN").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 仅由内置默认值构成的配置，不读取文件和环境变量
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Default probe settings
            .set_default("probe.base_url", "http://127.0.0.1:8080/preview/?i=1&q=")?
            .set_default("probe.timeout_secs", 10)?
            .set_default(
                "probe.user_agent",
                "Mozilla/5.0 (compatible; qscanrs/0.1)",
            )?
            // Default scan settings
            .set_default("scan.concurrency", 100)?
            .set_default("scan.progress_every", 1000)?
            // Default page markers
            .set_default("markers.detail_page", "جزئیات فیلم/سریال")?
            .set_default("markers.name_label", "نام:")?
            // Default extraction labels
            .set_default("labels.name", "نام:")?
            .set_default("labels.rating", "امتیاز:")?
            .set_default("labels.year", "سال انتشار:")?
            .set_default("labels.summary", "خلاصه:")?
            // Default storage settings
            .set_default("storage.input_dir", "q-generated")?
            .set_default("storage.output_dir", "q-success")?
            .set_default("storage.manual_file", "manual/generated.json")?
            // Default generator settings
            .set_default("generator.alphabet", "abcdefghijklmnopqrstuvwxyz")?
            .set_default("generator.token_length", 5)?
            .set_default("generator.target_file_mb", 10)?
            .set_default("generator.bytes_per_item", 30)?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
