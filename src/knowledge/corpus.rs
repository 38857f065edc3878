use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Document;

/// 以关键词短语为键的语料条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub keywords: String,
    pub documents: Vec<Document>,
}

impl CorpusEntry {
    /// 每个关键词都出现在小写查询中即视为命中（子串匹配）
    pub fn matches(&self, query_lower: &str) -> bool {
        self.keywords
            .split_whitespace()
            .all(|keyword| query_lower.contains(&keyword.to_lowercase()))
    }
}

/// 关键词匹配的文档库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCorpus {
    pub entries: Vec<CorpusEntry>,
}

impl KnowledgeCorpus {
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// 从 JSON 文件加载语料
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read knowledge corpus: {:?}", path))?;
        let corpus: KnowledgeCorpus =
            serde_json::from_str(&content).context("Failed to parse knowledge corpus")?;
        Ok(corpus)
    }

    /// 按语料顺序收集所有命中条目的文档
    pub fn lookup(&self, query: &str) -> Vec<Document> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&query_lower))
            .flat_map(|entry| entry.documents.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeCorpus {
    fn default() -> Self {
        Self::new(vec![
            CorpusEntry {
                keywords: "corn nitrogen deficiency treatments".to_string(),
                documents: vec![
                    Document::new(
                        "Management of Nitrogen Deficiency in Corn",
                        "Apply side-dress nitrogen immediately at V4-V8 stages. Sources like UAN or Urea are effective. Rate: 40-60 lbs/acre. Delayed application can recover up to 90% of yield potential.",
                    ),
                    Document::new(
                        "Identifying Nutrient Deficiencies in Corn",
                        "Yellowing in V-shape starting at leaf tip indicates N deficiency. Wet soils can exacerbate leaching, requiring supplemental N.",
                    ),
                    Document::new(
                        "Wet Season Corn Nitrogen Management",
                        "In years with excessive rainfall, additional N applications (30-50 lbs N/acre) are profitable. Rescue applications must occur before silking.",
                    ),
                ],
            },
            CorpusEntry {
                keywords: "corn nitrogen deficiency heavy rainfall".to_string(),
                documents: vec![Document::new(
                    "Nitrogen Loss from Heavy Rains",
                    "Heavy rainfall causes denitrification and leaching. For every inch of rain above soil saturation, expect 2-4% nitrate loss. Supplemental N is critical.",
                )],
            },
            CorpusEntry {
                keywords: "soybean moisture requirements".to_string(),
                documents: vec![Document::new(
                    "Soybean Water Requirements",
                    "Soybeans require 15-25 inches of water per season. Critical period is pod filling (R3-R6).",
                )],
            },
        ])
    }
}
