use asmt_export::core::Storage;
use asmt_export::utils::{logger, validation::Validate};
use asmt_export::{
    CliConfig, Destination, EtlEngine, ExportError, ExportPipeline, ExportReport, JiraFetcher,
    LocalStorage, RunConfig,
};
use clap::Parser;

async fn run_with<S: Storage>(
    storage: S,
    config: RunConfig,
    monitor: bool,
) -> asmt_export::Result<ExportReport> {
    let fetcher = JiraFetcher::new(&config)?;
    let pipeline = ExportPipeline::new(fetcher, storage, config);
    EtlEngine::new_with_monitoring(pipeline, monitor).run().await
}

async fn export(config: RunConfig, monitor: bool) -> asmt_export::Result<ExportReport> {
    config.validate()?;

    match config.destination.clone() {
        Destination::Local { directory } => {
            run_with(LocalStorage::new(directory), config, monitor).await
        }
        #[cfg(feature = "s3")]
        Destination::S3 { bucket, region } => {
            let storage = asmt_export::S3Storage::from_env(bucket, region).await;
            run_with(storage, config, monitor).await
        }
        #[cfg(not(feature = "s3"))]
        Destination::S3 { .. } => Err(ExportError::ConfigError {
            message: "this build has no S3 support; use --output-dir".to_string(),
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.log_level);
    } else {
        logger::init_cli_logger(cli.log_level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let monitor = cli.monitor;
    let result = match cli.into_run_config() {
        Ok(config) => export(config, monitor).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!("✅ Export completed: {}", serde_json::to_string(&report)?);
            println!(
                "✅ Exported {} records to {}",
                report.records_written, report.output_location
            );
            if report.records_skipped > 0 {
                println!("⚠️ Skipped {} malformed records", report.records_skipped);
            }
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn report_failure(e: &ExportError) {
    tracing::error!(
        "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}
