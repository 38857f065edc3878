use crate::config::Config;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::types::AnalysisReport;
use crate::pipeline::{diagnose, research, synthesize};
use crate::sensors::{Reading, ReadingsFile, SensorSource, SimulatedSensorNetwork, validate_batch};

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: HashMap<&'static str, Duration>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: HashMap::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let duration = self.phase_start_times.remove(phase_name)?.elapsed();
        self.phase_durations.insert(phase_name, duration);
        Some(duration)
    }

    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 各阶段耗时（毫秒），包含总耗时
    pub fn timings_ms(&self) -> BTreeMap<String, u64> {
        let mut timings: BTreeMap<String, u64> = self
            .phase_durations
            .iter()
            .map(|(phase, duration)| (phase.to_string(), duration.as_millis() as u64))
            .collect();
        timings.insert(
            TimingKeys::TOTAL_EXECUTION.to_string(),
            self.get_total_duration().as_millis() as u64,
        );
        timings
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("各阶段执行时间:\n");
            let mut phases: Vec<_> = self.phase_durations.iter().collect();
            phases.sort_by_key(|(phase, _)| **phase);
            for (phase, duration) in phases {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const DIAGNOSE: &'static str = "diagnose";
    pub const RESEARCH: &'static str = "research";
    pub const SYNTHESIZE: &'static str = "synthesize";
    pub const TOTAL_EXECUTION: &'static str = "total_execution";
}

/// 按配置选择传感器数据源
pub fn sensor_source(config: &Config) -> Box<dyn SensorSource> {
    match &config.readings_path {
        Some(path) => Box::new(ReadingsFile::new(path)),
        None => Box::new(SimulatedSensorNetwork::new(
            &config.crop,
            config.soil_profile_for(&config.crop),
            config.zones,
            config.seed,
        )),
    }
}

/// 启动田块分析工作流
pub async fn launch(config: &Config) -> Result<AnalysisReport> {
    config.validate()?;
    let context = PipelineContext::new(config.clone())?;

    info!("📡 正在连接土壤传感器网络...");
    let readings = sensor_source(config).read_sensors()?;
    info!("✓ 已获取 {} 个分区的读数", readings.len());

    run_analysis(&context, readings).await
}

/// 诊断 → 研究 → 综合，严格顺序执行
pub async fn run_analysis(
    context: &PipelineContext,
    readings: Vec<Reading>,
) -> Result<AnalysisReport> {
    validate_batch(&readings)?;
    let mut timing = TimingScope::new();

    timing.start_phase(TimingKeys::DIAGNOSE);
    let diagnosis = diagnose::execute(context, &readings)?;
    timing.end_phase(TimingKeys::DIAGNOSE);

    if diagnosis.is_healthy() {
        info!("✅ 田块状态良好");
    } else {
        info!("⚠️ 检测到 {} 个异常", diagnosis.anomalies.len());
        for anomaly in &diagnosis.anomalies {
            info!("  - {}", anomaly);
        }
    }

    timing.start_phase(TimingKeys::RESEARCH);
    let findings = research::execute(context, &diagnosis).await;
    timing.end_phase(TimingKeys::RESEARCH);

    timing.start_phase(TimingKeys::SYNTHESIZE);
    let recommendation = synthesize::execute(&diagnosis, &findings);
    timing.end_phase(TimingKeys::SYNTHESIZE);

    debug!("{}", timing.generate_timing_report());

    Ok(AnalysisReport {
        run_id: uuid::Uuid::new_v4(),
        generated_at: chrono::Utc::now(),
        crop: context.crop().to_string(),
        readings,
        diagnosis,
        findings,
        recommendation,
        timings: timing.timings_ms(),
    })
}
