// 田块分析流水线
// 诊断（diagnose）：聚合分区读数，按作物阈值归类异常
// 研究（research）：为每个异常制定检索，复合条件下追加细化检索
// 综合（synthesize）：按异常数量定级，选择建议模板与引用来源
// 各阶段无跨运行状态，由 workflow 顺序编排，outlet 负责展示

pub mod context;
pub mod diagnose;
pub mod outlet;
pub mod research;
pub mod synthesize;
pub mod types;
pub mod workflow;
