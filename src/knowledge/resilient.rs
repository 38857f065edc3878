use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use super::{Document, KnowledgeLookup, KnowledgeSource, LookupError, LookupOutcome};

/// 为可能失败的检索源加上超时与回退
pub struct ResilientLookup<S> {
    source: S,
    timeout: Duration,
}

impl<S: KnowledgeSource> ResilientLookup<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    fn fallback(query: &str, max_results: usize, error: LookupError) -> LookupOutcome {
        warn!(query, %error, "knowledge lookup degraded to fallback");
        let documents = std::iter::once(Document::bulletin(query))
            .take(max_results)
            .collect();
        LookupOutcome::Fallback {
            reason: error.to_string(),
            documents,
        }
    }
}

#[async_trait]
impl<S: KnowledgeSource> KnowledgeLookup for ResilientLookup<S> {
    async fn search(&self, query: &str, max_results: usize) -> LookupOutcome {
        match tokio::time::timeout(self.timeout, self.source.fetch(query, max_results)).await {
            Ok(Ok(documents)) => LookupOutcome::Hits(documents),
            Ok(Err(error)) => Self::fallback(query, max_results, error),
            Err(_) => Self::fallback(query, max_results, LookupError::Timeout(self.timeout)),
        }
    }
}
