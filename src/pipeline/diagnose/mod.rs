use anyhow::Result;
use tracing::info;

use crate::config::CropThresholds;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::types::{AnomalyKind, Diagnosis};
use crate::sensors::Reading;

/// 诊断错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error("insufficient data: at least one sensor reading is required")]
    InsufficientData,
}

/// 执行诊断阶段
pub fn execute(context: &PipelineContext, readings: &[Reading]) -> Result<Diagnosis> {
    let aggregator = TelemetryAggregator::new(context.thresholds()?);
    Ok(aggregator.diagnose(readings)?)
}

/// 田块遥测聚合器，按作物阈值把田块均值归类为异常
#[derive(Debug, Clone)]
pub struct TelemetryAggregator {
    thresholds: CropThresholds,
}

impl TelemetryAggregator {
    pub fn new(thresholds: CropThresholds) -> Self {
        Self { thresholds }
    }

    pub fn diagnose(&self, readings: &[Reading]) -> Result<Diagnosis, DiagnosisError> {
        if readings.is_empty() {
            return Err(DiagnosisError::InsufficientData);
        }

        info!("🔬 阶段一：分析传感器数据流（{} 个分区）...", readings.len());

        let avg_nitrogen = field_mean(readings, |r| r.nitrogen);
        let avg_moisture = field_mean(readings, |r| r.moisture);

        info!("   田块平均氮含量: {:.1} mg/kg", avg_nitrogen);
        info!("   田块平均湿度: {:.1} %", avg_moisture);

        // 顺序固定：先氮后湿度
        let mut anomalies = Vec::new();
        if avg_nitrogen < self.thresholds.nitrogen_min {
            anomalies.push(AnomalyKind::NitrogenDeficiency);
        }
        if avg_moisture > self.thresholds.moisture_max {
            anomalies.push(AnomalyKind::ExcessiveMoisture);
        }

        Ok(Diagnosis {
            avg_nitrogen,
            avg_moisture,
            anomalies,
        })
    }
}

/// 逐项先除以分区数再累加，极大读数也不会溢出；结果收敛到输入的最小/最大值之间
fn field_mean(readings: &[Reading], field: fn(&Reading) -> f64) -> f64 {
    let count = readings.len() as f64;
    let mut mean = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in readings.iter().map(field) {
        mean += value / count;
        min = min.min(value);
        max = max.max(value);
    }

    if min <= max { mean.clamp(min, max) } else { mean }
}
