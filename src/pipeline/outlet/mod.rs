use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::{Config, ReportFormat};
use crate::pipeline::types::AnalysisReport;

/// 输出报告
pub fn save(config: &Config, report: &AnalysisReport) -> Result<()> {
    match &config.output_path {
        Some(path) => DiskOutlet::new(config.format, path.clone()).save(report),
        None => ConsoleOutlet::new(config.format).save(report),
    }
}

pub trait Outlet {
    fn save(&self, report: &AnalysisReport) -> Result<()>;
}

/// 按格式渲染报告
pub fn render(report: &AnalysisReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => render_text(report).context("Failed to render analysis report"),
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize analysis report")
        }
    }
}

fn render_text(report: &AnalysisReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let diagnosis = &report.diagnosis;
    let recommendation = &report.recommendation;

    writeln!(out, "AgriNexus - Precision Agriculture Consultant")?;
    writeln!(
        out,
        "Run {} | {} | crop: {}",
        report.run_id,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.crop
    )?;

    writeln!(out, "\nLive Sensor Telemetry")?;
    writeln!(
        out,
        "{:>7} | {:>16} | {:>12} | {}",
        "Zone ID", "Nitrogen (mg/kg)", "Moisture (%)", "Status"
    )?;
    for reading in &report.readings {
        writeln!(
            out,
            "{:>7} | {:>16.1} | {:>12.1} | {}",
            reading.zone_id, reading.nitrogen, reading.moisture, reading.status
        )?;
    }

    writeln!(out, "\nField Average N: {:.1} mg/kg", diagnosis.avg_nitrogen)?;
    writeln!(out, "Field Average Moisture: {:.1} %", diagnosis.avg_moisture)?;

    if diagnosis.is_healthy() {
        writeln!(out, "\nField Status Optimal")?;
    } else {
        writeln!(out, "\nALERT: {} Anomalies Detected", diagnosis.anomalies.len())?;
        for label in diagnosis.labels() {
            writeln!(out, "  - {}", label)?;
        }
    }

    if !report.findings.queries.is_empty() {
        writeln!(out, "\nResearch Queries")?;
        for query in &report.findings.queries {
            writeln!(
                out,
                "  > [{}] '{}' ({} documents{})",
                query.kind,
                query.text,
                query.documents,
                if query.fallback { ", fallback" } else { "" }
            )?;
        }
    }

    writeln!(out, "\n=== AGRINEXUS INTELLIGENCE REPORT ===")?;
    writeln!(
        out,
        "strategic_advisory_{} | Alert: {} | Sources: {}",
        report.generated_at.timestamp(),
        recommendation.alert_level,
        recommendation.sources.len()
    )?;
    writeln!(out, "Diagnosis: {}\n", recommendation.diagnosis)?;
    writeln!(out, "{}", recommendation.action_plan)?;

    if !recommendation.sources.is_empty() {
        writeln!(out, "\nCitations:")?;
        for (i, source) in recommendation.sources.iter().enumerate() {
            writeln!(out, " {}. {}", i + 1, source)?;
        }
    }

    Ok(out)
}

/// 输出到标准输出
pub struct ConsoleOutlet {
    format: ReportFormat,
}

impl ConsoleOutlet {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }
}

impl Outlet for ConsoleOutlet {
    fn save(&self, report: &AnalysisReport) -> Result<()> {
        println!("{}", render(report, self.format)?);
        Ok(())
    }
}

/// 写入文件
pub struct DiskOutlet {
    format: ReportFormat,
    path: PathBuf,
}

impl DiskOutlet {
    pub fn new(format: ReportFormat, path: PathBuf) -> Self {
        Self { format, path }
    }
}

impl Outlet for DiskOutlet {
    fn save(&self, report: &AnalysisReport) -> Result<()> {
        if let Some(parent_dir) = self.path.parent()
            && !parent_dir.as_os_str().is_empty()
        {
            fs::create_dir_all(parent_dir)?;
        }

        let content = render(report, self.format)?;
        fs::write(&self.path, content)
            .context(format!("Failed to write report: {:?}", self.path))?;

        info!("💾 报告已保存: {}", self.path.display());
        Ok(())
    }
}
