use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::{Config, ConfigError, CropThresholds};
use crate::knowledge::{KnowledgeCorpus, KnowledgeLookup, ResilientLookup, SimulatedKnowledgeBase};

#[derive(Clone)]
pub struct PipelineContext {
    /// 知识检索器，对调用方不报错
    pub lookup: Arc<dyn KnowledgeLookup>,
    /// 配置
    pub config: Config,
}

impl PipelineContext {
    /// 按配置创建上下文
    pub fn new(config: Config) -> Result<Self> {
        let knowledge = &config.knowledge;
        let corpus = match &knowledge.corpus_path {
            Some(path) => KnowledgeCorpus::from_file(path)?,
            None => KnowledgeCorpus::default(),
        };
        let source = SimulatedKnowledgeBase::new(corpus)
            .with_latency(Duration::from_millis(knowledge.latency_ms))
            .with_fallback_on_miss(knowledge.fallback_on_miss);
        let lookup = ResilientLookup::new(source, Duration::from_secs(knowledge.timeout_seconds));

        Ok(Self::with_lookup(config, Arc::new(lookup)))
    }

    /// 使用外部提供的检索器创建上下文
    pub fn with_lookup(config: Config, lookup: Arc<dyn KnowledgeLookup>) -> Self {
        Self { lookup, config }
    }

    pub fn crop(&self) -> &str {
        &self.config.crop
    }

    pub fn thresholds(&self) -> Result<CropThresholds, ConfigError> {
        self.config.thresholds_for(&self.config.crop)
    }
}
