// 研究阶段
// 每个异常先发出一次宽泛检索 "{crop} {异常} treatments"；
// 缺氮且同时过湿时，追加一次结合降雨淋失背景的细化检索，结果紧跟在宽泛检索之后。
// 每个异常最多两次检索，结果不去重、不截断，引用数量由综合阶段控制。

use crate::pipeline::context::PipelineContext;
use crate::pipeline::research::strategist::ResearchStrategist;
use crate::pipeline::research::types::Findings;
use crate::pipeline::types::Diagnosis;

pub mod strategist;
pub mod types;

/// 执行研究阶段
pub async fn execute(context: &PipelineContext, diagnosis: &Diagnosis) -> Findings {
    let strategist = ResearchStrategist::new(
        context.lookup.clone(),
        context.config.knowledge.max_results,
    );
    strategist
        .research(&diagnosis.anomalies, context.crop())
        .await
}

// Include tests
#[cfg(test)]
mod tests;
