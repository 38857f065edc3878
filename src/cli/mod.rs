use crate::config::{Config, ReportFormat};
use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "agrinexus.toml";

/// AgriNexus - 精准农业田块分析顾问
#[derive(Parser, Debug)]
#[command(name = "agrinexus-rs")]
#[command(
    about = "Precision agriculture consultant: diagnoses soil telemetry, researches treatments and synthesizes a prioritized action plan."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 作物类型
    #[arg(long)]
    pub crop: Option<String>,

    /// 模拟传感器分区数量
    #[arg(short, long)]
    pub zones: Option<u32>,

    /// 读数文件（JSON），指定后不使用模拟传感器
    #[arg(short, long)]
    pub readings: Option<PathBuf>,

    /// 随机种子
    #[arg(long)]
    pub seed: Option<u64>,

    /// 单次检索最多返回的文档数
    #[arg(long)]
    pub max_results: Option<usize>,

    /// 模拟检索延迟（毫秒）
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// 知识语料文件（JSON）
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// 语料未命中时不返回通用公告文档
    #[arg(long)]
    pub no_fallback: bool,

    /// 报告格式 (text, json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// 报告输出路径
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        // 覆盖配置文件中的设置
        if let Some(crop) = self.crop {
            config.crop = crop.to_lowercase();
        }
        if let Some(zones) = self.zones {
            config.zones = zones;
        }
        if let Some(readings) = self.readings {
            config.readings_path = Some(readings);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        // 知识检索配置
        if let Some(max_results) = self.max_results {
            config.knowledge.max_results = max_results;
        }
        if let Some(latency_ms) = self.latency_ms {
            config.knowledge.latency_ms = latency_ms;
        }
        if let Some(corpus) = self.corpus {
            config.knowledge.corpus_path = Some(corpus);
        }
        if self.no_fallback {
            config.knowledge.fallback_on_miss = false;
        }

        // 输出配置
        if let Some(format) = self.format {
            config.format = format.parse::<ReportFormat>().map_err(|e| anyhow!(e))?;
        }
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}
