use std::sync::Arc;

use tracing::{info, warn};

use crate::knowledge::KnowledgeLookup;
use crate::pipeline::research::types::{Findings, QueryKind, ResearchQuery};
use crate::pipeline::types::AnomalyKind;

/// 单个异常的宽泛检索语句
pub fn primary_query(crop: &str, anomaly: AnomalyKind) -> String {
    format!("{} {} treatments", crop, anomaly.label())
}

/// 细化检索语句。每轮都对完整异常集合重新判断伴随异常是否存在
pub fn refinement_query(crop: &str, anomaly: AnomalyKind, anomalies: &[AnomalyKind]) -> Option<String> {
    anomaly
        .refinement()
        .filter(|(companion, _)| anomalies.contains(companion))
        .map(|(_, topic)| format!("{} {}", crop, topic))
}

/// 研究策略器：为每个异常制定检索，并在复合条件下追加细化检索
pub struct ResearchStrategist {
    lookup: Arc<dyn KnowledgeLookup>,
    max_results: usize,
}

impl ResearchStrategist {
    pub fn new(lookup: Arc<dyn KnowledgeLookup>, max_results: usize) -> Self {
        Self {
            lookup,
            max_results,
        }
    }

    pub async fn research(&self, anomalies: &[AnomalyKind], crop: &str) -> Findings {
        let mut findings = Findings::default();
        if anomalies.is_empty() {
            return findings;
        }

        info!("📚 阶段二：制定研究策略...");

        for &anomaly in anomalies {
            let query = primary_query(crop, anomaly);
            self.issue(QueryKind::Primary, anomaly, query, &mut findings)
                .await;

            if let Some(query) = refinement_query(crop, anomaly, anomalies) {
                info!("   触发细化检索：结合降雨背景补充证据");
                self.issue(QueryKind::Refinement, anomaly, query, &mut findings)
                    .await;
            }
        }

        info!(
            "✓ 研究完成，共 {} 次检索，{} 篇文档",
            findings.queries.len(),
            findings.len()
        );
        findings
    }

    async fn issue(&self, kind: QueryKind, anomaly: AnomalyKind, text: String, findings: &mut Findings) {
        info!("   > 生成检索: '{}'", text);

        let outcome = self.lookup.search(&text, self.max_results).await;
        let fallback = outcome.is_fallback();
        if fallback {
            warn!(query = %text, "检索降级为回退结果");
        }

        let documents = outcome.into_documents();
        findings.queries.push(ResearchQuery {
            kind,
            anomaly,
            text,
            documents: documents.len(),
            fallback,
        });
        findings.documents.extend(documents);
    }
}
