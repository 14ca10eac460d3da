use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a successful export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub output_location: String,
    pub records_written: usize,
    pub records_skipped: usize,
    pub bytes_written: usize,
    pub source_bytes: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ExportReport> {
        let started_at = Utc::now();
        tracing::info!("Starting assessment export");
        if self.monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }
        self.monitor.log_stats("Start");

        // Extract
        let raw = self.pipeline.extract().await?;
        let source_bytes = raw.bytes;
        tracing::info!("Downloaded {} bytes of export XML", source_bytes);
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(raw).await?;
        let records_written = result.records.len();
        let records_skipped = result.skipped.len();
        let bytes_written = result.payload.len();
        tracing::info!(
            "Normalized {} records ({} skipped)",
            records_written,
            records_skipped
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_location = self.pipeline.load(result).await?;
        tracing::info!("Published {} bytes to {}", bytes_written, output_location);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(ExportReport {
            output_location,
            records_written,
            records_skipped,
            bytes_written,
            source_bytes,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
