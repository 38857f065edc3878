use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use uuid::Uuid;

use crate::pipeline::research::types::Findings;
use crate::pipeline::synthesize::types::Recommendation;
use crate::sensors::Reading;

/// 异常类型枚举，序列化为固定的异常描述
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyKind {
    #[serde(rename = "Nitrogen Deficiency detected across multiple zones")]
    NitrogenDeficiency,
    #[serde(rename = "Excessive Soil Moisture detected")]
    ExcessiveMoisture,
}

impl AnomalyKind {
    pub const fn label(self) -> &'static str {
        match self {
            AnomalyKind::NitrogenDeficiency => "Nitrogen Deficiency detected across multiple zones",
            AnomalyKind::ExcessiveMoisture => "Excessive Soil Moisture detected",
        }
    }

    /// 复合土壤条件：当伴随异常同时存在时，需要追加一次措辞不同的细化检索。
    /// 返回 (伴随异常, 细化检索主题)
    pub const fn refinement(self) -> Option<(AnomalyKind, &'static str)> {
        match self {
            AnomalyKind::NitrogenDeficiency => Some((
                AnomalyKind::ExcessiveMoisture,
                "nitrogen deficiency heavy rainfall leaching",
            )),
            AnomalyKind::ExcessiveMoisture => None,
        }
    }
}

impl Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 诊断结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub avg_nitrogen: f64,
    pub avg_moisture: f64,
    pub anomalies: Vec<AnomalyKind>,
}

impl Diagnosis {
    pub fn is_healthy(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.anomalies.iter().map(|a| a.label()).collect()
    }
}

/// 一次分析运行的完整产出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub crop: String,
    pub readings: Vec<Reading>,
    pub diagnosis: Diagnosis,
    pub findings: Findings,
    pub recommendation: Recommendation,
    /// 各阶段耗时（毫秒）
    pub timings: BTreeMap<String, u64>,
}
