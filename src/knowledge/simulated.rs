use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{Document, KnowledgeCorpus, KnowledgeSource, LookupError};

/// 基于本地语料的确定性检索源
#[derive(Debug, Clone)]
pub struct SimulatedKnowledgeBase {
    corpus: KnowledgeCorpus,
    latency: Duration,
    fallback_on_miss: bool,
}

impl SimulatedKnowledgeBase {
    pub fn new(corpus: KnowledgeCorpus) -> Self {
        Self {
            corpus,
            latency: Duration::ZERO,
            fallback_on_miss: true,
        }
    }

    /// 模拟网络延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 未命中时是否返回通用公告文档
    pub fn with_fallback_on_miss(mut self, enabled: bool) -> Self {
        self.fallback_on_miss = enabled;
        self
    }
}

impl Default for SimulatedKnowledgeBase {
    fn default() -> Self {
        Self::new(KnowledgeCorpus::default())
    }
}

#[async_trait]
impl KnowledgeSource for SimulatedKnowledgeBase {
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<Document>, LookupError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut documents = self.corpus.lookup(query);
        if documents.is_empty() && self.fallback_on_miss {
            debug!(query, "corpus miss, returning bulletin");
            documents.push(Document::bulletin(query));
        }
        documents.truncate(max_results);
        Ok(documents)
    }
}
