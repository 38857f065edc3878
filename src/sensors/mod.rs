//! 土壤传感器数据源

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod file;
pub mod simulated;

pub use file::ReadingsFile;
pub use simulated::SimulatedSensorNetwork;

/// 分区状态，仅用于展示
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneStatus {
    #[serde(rename = "Optimal")]
    Optimal,
    #[serde(rename = "Check Required")]
    CheckRequired,
    #[serde(rename = "Unreported")]
    #[default]
    Unreported,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneStatus::Optimal => write!(f, "Optimal"),
            ZoneStatus::CheckRequired => write!(f, "Check Required"),
            ZoneStatus::Unreported => write!(f, "-"),
        }
    }
}

/// 单个分区的一次测量
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Reading {
    pub zone_id: u32,
    /// mg/kg
    pub nitrogen: f64,
    /// %
    pub moisture: f64,
    #[serde(default)]
    pub phosphorus: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub status: ZoneStatus,
}

impl Reading {
    /// 仅包含决策规则所需字段的读数
    pub fn new(zone_id: u32, nitrogen: f64, moisture: f64) -> Self {
        Self {
            zone_id,
            nitrogen,
            moisture,
            phosphorus: None,
            potassium: None,
            ph: None,
            status: ZoneStatus::Unreported,
        }
    }
}

/// 传感器数据错误
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("zone id must be positive")]
    InvalidZoneId,

    #[error("duplicate zone id {0} in reading batch")]
    DuplicateZoneId(u32),

    #[error("zone {zone_id}: {field} must be a non-negative number, got {value}")]
    InvalidMeasurement {
        zone_id: u32,
        field: &'static str,
        value: f64,
    },

    #[error("failed to read sensor data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed sensor data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// 传感器数据源
pub trait SensorSource {
    /// 读取一批分区读数
    fn read_sensors(&mut self) -> Result<Vec<Reading>, SensorError>;
}

/// 校验一批读数，违反约定时立即失败
pub fn validate_batch(readings: &[Reading]) -> Result<(), SensorError> {
    let mut seen = HashSet::with_capacity(readings.len());
    for reading in readings {
        if reading.zone_id == 0 {
            return Err(SensorError::InvalidZoneId);
        }
        if !seen.insert(reading.zone_id) {
            return Err(SensorError::DuplicateZoneId(reading.zone_id));
        }
        for (field, value) in [("nitrogen", reading.nitrogen), ("moisture", reading.moisture)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SensorError::InvalidMeasurement {
                    zone_id: reading.zone_id,
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}
