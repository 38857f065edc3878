//! 从 JSON 文件加载读数

use std::path::PathBuf;

use tracing::debug;

use super::{Reading, SensorError, SensorSource, validate_batch};

/// JSON 读数文件（读数数组）
#[derive(Debug, Clone)]
pub struct ReadingsFile {
    path: PathBuf,
}

impl ReadingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SensorSource for ReadingsFile {
    fn read_sensors(&mut self) -> Result<Vec<Reading>, SensorError> {
        let content = std::fs::read_to_string(&self.path)?;
        let readings: Vec<Reading> = serde_json::from_str(&content)?;
        validate_batch(&readings)?;

        debug!(path = %self.path.display(), count = readings.len(), "readings loaded");
        Ok(readings)
    }
}
