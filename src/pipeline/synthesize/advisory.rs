//! 按告警级别选择的静态建议模板

use crate::pipeline::synthesize::types::AlertLevel;

pub const HEALTHY_SUMMARY: &str = "Optimal Conditions";

pub const MONITORING_PLAN: &str = "Continue monitoring. No intervention required.";

// TODO: 接入生成式综合后端后，改为基于检索到的文档生成方案
pub const INTERVENTION_PLAN: &str = "**IMMEDIATE ACTION REQUIRED**\n\n\
1. **Nitrogen Application**: Field averages indicate critical N deficiency (Avg < 120mg/kg). \
However, due to high moisture levels, standard pre-plant application is ineffective.\n\
2. **Recommendation**: Switch to a **side-dress application** of UAN-28 or Urea with a urease inhibitor. \
Wait for soil to drain to field capacity before traffic to avoid compaction.\n\
3. **Rate**: Target 40-60 lbs N/acre rescue application.";

pub fn action_plan(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Green => MONITORING_PLAN,
        AlertLevel::Yellow | AlertLevel::Red => INTERVENTION_PLAN,
    }
}
