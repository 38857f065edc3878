pub mod cli;
pub mod config;
pub mod knowledge;
pub mod pipeline;
pub mod sensors;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::diagnose::DiagnosisError;
pub use pipeline::types::{AnalysisReport, AnomalyKind, Diagnosis};
pub use pipeline::synthesize::types::{AlertLevel, Recommendation};
pub use pipeline::workflow::{launch, run_analysis};
