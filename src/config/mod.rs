use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// 默认作物
pub const DEFAULT_CROP: &str = "corn";

/// 配置错误
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("no anomaly thresholds configured for crop `{0}`")]
    UnknownCrop(String),

    #[error("invalid soil profile `{crop}`: {field} range {min}..={max}")]
    InvalidSoilRange {
        crop: String,
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("invalid thresholds for crop `{crop}`: {field} = {value}")]
    InvalidThreshold {
        crop: String,
        field: &'static str,
        value: f64,
    },

    #[error("knowledge.max_results must be at least 1")]
    ZeroMaxResults,

    #[error("knowledge.timeout_seconds must be at least 1")]
    ZeroTimeout,
}

/// 报告输出格式
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 作物类型
    pub crop: String,

    /// 模拟传感器网络的分区数量
    pub zones: u32,

    /// 随机种子，设置后模拟读数可复现
    pub seed: Option<u64>,

    /// 读数文件路径，设置后不再使用模拟传感器
    pub readings_path: Option<PathBuf>,

    /// 各作物的异常判定阈值
    pub thresholds: HashMap<String, CropThresholds>,

    /// 各作物的土壤采样范围
    pub soil_profiles: HashMap<String, SoilProfile>,

    /// 知识检索配置
    pub knowledge: KnowledgeConfig,

    /// 报告格式
    pub format: ReportFormat,

    /// 报告输出路径
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 作物异常判定阈值
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct CropThresholds {
    /// 田块平均氮含量低于该值视为缺氮 (mg/kg)
    pub nitrogen_min: f64,

    /// 田块平均湿度高于该值视为过湿 (%)
    pub moisture_max: f64,
}

impl CropThresholds {
    fn fields(&self) -> [(&'static str, f64); 2] {
        [
            ("nitrogen_min", self.nitrogen_min),
            ("moisture_max", self.moisture_max),
        ]
    }

    pub const CORN: CropThresholds = CropThresholds {
        nitrogen_min: 120.0,
        moisture_max: 40.0,
    };
}

/// 闭区间采样范围
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SoilRange {
    pub min: f64,
    pub max: f64,
}

impl SoilRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

/// 作物土壤画像，模拟传感器按此范围均匀采样
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SoilProfile {
    pub nitrogen: SoilRange,
    pub phosphorus: SoilRange,
    pub potassium: SoilRange,
    pub ph: SoilRange,
    pub moisture: SoilRange,
}

impl SoilProfile {
    pub const CORN: SoilProfile = SoilProfile {
        nitrogen: SoilRange::new(140.0, 200.0),
        phosphorus: SoilRange::new(30.0, 70.0),
        potassium: SoilRange::new(100.0, 200.0),
        ph: SoilRange::new(5.8, 7.0),
        moisture: SoilRange::new(60.0, 80.0),
    };

    pub const SOYBEAN: SoilProfile = SoilProfile {
        nitrogen: SoilRange::new(20.0, 40.0),
        phosphorus: SoilRange::new(30.0, 60.0),
        potassium: SoilRange::new(100.0, 150.0),
        ph: SoilRange::new(6.0, 7.0),
        moisture: SoilRange::new(50.0, 70.0),
    };

    pub const WHEAT: SoilProfile = SoilProfile {
        nitrogen: SoilRange::new(100.0, 150.0),
        phosphorus: SoilRange::new(40.0, 60.0),
        potassium: SoilRange::new(80.0, 120.0),
        ph: SoilRange::new(6.0, 7.5),
        moisture: SoilRange::new(40.0, 60.0),
    };

    fn ranges(&self) -> [(&'static str, &SoilRange); 5] {
        [
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
            ("ph", &self.ph),
            ("moisture", &self.moisture),
        ]
    }
}

/// 知识检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// 单次检索最多返回的文档数
    pub max_results: usize,

    /// 单次检索超时时间（秒）
    pub timeout_seconds: u64,

    /// 模拟检索延迟（毫秒）
    pub latency_ms: u64,

    /// 语料未命中时是否返回通用公告文档
    pub fallback_on_miss: bool,

    /// 自定义语料文件（JSON）
    pub corpus_path: Option<PathBuf>,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 获取当前作物的异常阈值
    pub fn thresholds_for(&self, crop: &str) -> Result<CropThresholds, ConfigError> {
        self.thresholds
            .get(&crop.to_lowercase())
            .copied()
            .ok_or_else(|| ConfigError::UnknownCrop(crop.to_string()))
    }

    /// 获取作物的土壤画像，未配置的作物回落到玉米画像
    pub fn soil_profile_for(&self, crop: &str) -> SoilProfile {
        self.soil_profiles
            .get(&crop.to_lowercase())
            .or_else(|| self.soil_profiles.get(DEFAULT_CROP))
            .copied()
            .unwrap_or(SoilProfile::CORN)
    }

    /// 校验配置，在流程开始前尽早失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds_for(&self.crop)?;

        for (crop, thresholds) in &self.thresholds {
            for (field, value) in thresholds.fields() {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidThreshold {
                        crop: crop.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        for (crop, profile) in &self.soil_profiles {
            for (field, range) in profile.ranges() {
                if !range.is_valid() {
                    return Err(ConfigError::InvalidSoilRange {
                        crop: crop.clone(),
                        field,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        if self.knowledge.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }

        if self.knowledge.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crop: DEFAULT_CROP.to_string(),
            zones: 4,
            seed: None,
            readings_path: None,
            thresholds: HashMap::from([(DEFAULT_CROP.to_string(), CropThresholds::CORN)]),
            soil_profiles: HashMap::from([
                ("corn".to_string(), SoilProfile::CORN),
                ("soybean".to_string(), SoilProfile::SOYBEAN),
                ("wheat".to_string(), SoilProfile::WHEAT),
            ]),
            knowledge: KnowledgeConfig::default(),
            format: ReportFormat::default(),
            output_path: None,
            verbose: false,
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            max_results: 3,
            timeout_seconds: 10,
            latency_ms: 0,
            fallback_on_miss: true,
            corpus_path: None,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
