//! 知识检索：语料、模拟检索源与容错包装

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod corpus;
pub mod resilient;
pub mod simulated;

pub use corpus::{CorpusEntry, KnowledgeCorpus};
pub use resilient::ResilientLookup;
pub use simulated::SimulatedKnowledgeBase;

/// 知识条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub body: String,
}

impl Document {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// 引用查询本身的通用公告文档
    pub fn bulletin(query: &str) -> Self {
        Self::new(
            format!("Agricultural Bulletin: {}", query),
            format!(
                "Recent studies show that regarding {}, optimal management requires monitoring soil conditions and weather patterns closely.",
                query
            ),
        )
    }
}

/// 检索结果。回退是预期内的结果而不是错误
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Hits(Vec<Document>),
    Fallback {
        reason: String,
        documents: Vec<Document>,
    },
}

impl LookupOutcome {
    pub fn documents(&self) -> &[Document] {
        match self {
            LookupOutcome::Hits(documents) => documents,
            LookupOutcome::Fallback { documents, .. } => documents,
        }
    }

    pub fn into_documents(self) -> Vec<Document> {
        match self {
            LookupOutcome::Hits(documents) => documents,
            LookupOutcome::Fallback { documents, .. } => documents,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LookupOutcome::Fallback { .. })
    }
}

/// 检索源内部错误，不会越过 [`KnowledgeLookup`] 边界
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("knowledge source unavailable: {0}")]
    Unavailable(String),

    #[error("knowledge lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// 对调用方不报错的知识检索
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> LookupOutcome;
}

/// 可能失败的底层检索源
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<Document>, LookupError>;
}
