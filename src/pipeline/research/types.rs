use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::knowledge::Document;
use crate::pipeline::types::AnomalyKind;

/// 检索类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// 针对单个异常的宽泛检索
    Primary,
    /// 复合条件触发的细化检索
    Refinement,
}

impl Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Primary => write!(f, "primary"),
            QueryKind::Refinement => write!(f, "refinement"),
        }
    }
}

/// 已发出的检索及其结果概况
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchQuery {
    pub kind: QueryKind,
    pub anomaly: AnomalyKind,
    pub text: String,
    pub documents: usize,
    pub fallback: bool,
}

/// 研究阶段累积的文档（按检索顺序展开，不去重）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub documents: Vec<Document>,
    pub queries: Vec<ResearchQuery>,
}

impl Findings {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn refinement_count(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| q.kind == QueryKind::Refinement)
            .count()
    }
}
