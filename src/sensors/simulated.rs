//! 模拟土壤传感器网络

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{Reading, SensorError, SensorSource, ZoneStatus};
use crate::config::{SoilProfile, SoilRange};

/// 每个分区出现问题的概率
pub const PROBLEM_ZONE_PROBABILITY: f64 = 0.3;
/// 问题分区的氮含量系数
pub const PROBLEM_NITROGEN_FACTOR: f64 = 0.6;
/// 问题分区的湿度系数
pub const PROBLEM_MOISTURE_FACTOR: f64 = 1.4;

/// 按作物土壤画像随机采样的传感器网络
pub struct SimulatedSensorNetwork {
    crop: String,
    profile: SoilProfile,
    zones: u32,
    rng: StdRng,
}

impl SimulatedSensorNetwork {
    pub fn new(crop: &str, profile: SoilProfile, zones: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            crop: crop.to_string(),
            profile,
            zones,
            rng,
        }
    }

    /// 为 1..=zones 的每个分区生成一条读数
    pub fn generate(&mut self) -> Vec<Reading> {
        (1..=self.zones)
            .map(|zone_id| self.sample_zone(zone_id))
            .collect()
    }

    fn sample_zone(&mut self, zone_id: u32) -> Reading {
        let is_problem_zone = self.rng.random_bool(PROBLEM_ZONE_PROBABILITY);

        let mut nitrogen = self.sample(self.profile.nitrogen);
        let phosphorus = self.sample(self.profile.phosphorus);
        let potassium = self.sample(self.profile.potassium);
        let ph = self.sample(self.profile.ph);
        let mut moisture = self.sample(self.profile.moisture);

        if is_problem_zone {
            nitrogen *= PROBLEM_NITROGEN_FACTOR;
            moisture *= PROBLEM_MOISTURE_FACTOR;
        }

        Reading {
            zone_id,
            nitrogen: round2(nitrogen),
            moisture: round2(moisture),
            phosphorus: Some(round2(phosphorus)),
            potassium: Some(round2(potassium)),
            ph: Some(round2(ph)),
            status: if is_problem_zone {
                ZoneStatus::CheckRequired
            } else {
                ZoneStatus::Optimal
            },
        }
    }

    fn sample(&mut self, range: SoilRange) -> f64 {
        self.rng.random_range(range.min..=range.max)
    }
}

impl SensorSource for SimulatedSensorNetwork {
    fn read_sensors(&mut self) -> Result<Vec<Reading>, SensorError> {
        let readings = self.generate();
        debug!(crop = %self.crop, zones = readings.len(), "simulated readings generated");
        Ok(readings)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
