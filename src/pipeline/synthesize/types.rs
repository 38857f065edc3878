use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Green,
    Yellow,
    Red,
}

impl AlertLevel {
    /// 严重程度只取决于同时出现的异常类别数量
    pub fn from_anomaly_count(count: usize) -> Self {
        match count {
            0 => AlertLevel::Green,
            1 => AlertLevel::Yellow,
            _ => AlertLevel::Red,
        }
    }
}

impl Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            AlertLevel::Green => "GREEN",
            AlertLevel::Yellow => "YELLOW",
            AlertLevel::Red => "RED",
        };
        write!(f, "{}", str)
    }
}

/// 流水线的最终产出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub alert_level: AlertLevel,
    pub diagnosis: String,
    /// markdown
    pub action_plan: String,
    pub sources: Vec<String>,
}
