use tracing::info;

use crate::pipeline::research::types::Findings;
use crate::pipeline::synthesize::types::{AlertLevel, Recommendation};
use crate::pipeline::types::Diagnosis;

pub mod advisory;
pub mod types;

/// 最多引用的来源数量
pub const MAX_CITATIONS: usize = 2;

/// 执行综合阶段
pub fn execute(diagnosis: &Diagnosis, findings: &Findings) -> Recommendation {
    PlanSynthesizer.synthesize(diagnosis, findings)
}

/// 方案综合器
#[derive(Default)]
pub struct PlanSynthesizer;

impl PlanSynthesizer {
    pub fn synthesize(&self, diagnosis: &Diagnosis, findings: &Findings) -> Recommendation {
        info!("🧭 阶段三：综合行动方案...");

        let alert_level = AlertLevel::from_anomaly_count(diagnosis.anomalies.len());
        if diagnosis.is_healthy() {
            return Recommendation {
                alert_level,
                diagnosis: advisory::HEALTHY_SUMMARY.to_string(),
                action_plan: advisory::action_plan(alert_level).to_string(),
                sources: Vec::new(),
            };
        }

        let sources = findings
            .documents
            .iter()
            .take(MAX_CITATIONS)
            .map(|d| d.title.clone())
            .collect();

        Recommendation {
            alert_level,
            diagnosis: diagnosis.labels().join("; "),
            action_plan: advisory::action_plan(alert_level).to_string(),
            sources,
        }
    }
}
