use crate::config::credentials::Credentials;
use crate::config::toml_config::SettingsFile;
use crate::config::{Destination, RunConfig, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{ExportError, Result};
use crate::utils::logger::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "asmt-export", version)]
#[command(about = "Export assessment data from a Jira filter to a JSON file in S3")]
pub struct CliConfig {
    /// Base URL of the Jira server that houses the assessment data
    #[arg(long)]
    pub jira_base_url: String,

    /// Two-line file: Jira username, then password
    #[arg(long)]
    pub jira_credentials_file: PathBuf,

    /// ID of the Jira filter that produces the assessment XML export
    #[arg(long)]
    pub jira_filter: String,

    /// S3 bucket the JSON file is written to
    #[arg(long, required_unless_present = "output_dir", conflicts_with = "output_dir")]
    pub s3_bucket: Option<String>,

    #[arg(long, requires = "s3_bucket")]
    pub s3_region: Option<String>,

    /// Write the JSON file to a local directory instead of S3
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Name of the JSON object/file to create
    #[arg(long)]
    pub output_filename: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Optional TOML settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Passed to Jira as tempMax
    #[arg(long)]
    pub max_results: Option<u32>,

    #[arg(long, help = "Skip TLS certificate verification for the Jira server")]
    pub insecure: bool,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,
}

impl CliConfig {
    /// Resolve arguments, settings file and credentials into one run config.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let settings = match &self.settings {
            Some(path) => SettingsFile::from_file(path)?,
            None => SettingsFile::default(),
        };

        let destination = match (self.s3_bucket, self.output_dir) {
            (Some(bucket), None) => Destination::S3 {
                bucket,
                region: self.s3_region.or_else(|| settings.s3_region()),
            },
            (None, Some(directory)) => Destination::Local { directory },
            _ => {
                return Err(ExportError::MissingConfigError {
                    field: "exactly one of --s3-bucket or --output-dir".to_string(),
                })
            }
        };

        let credentials = Credentials::from_file(&self.jira_credentials_file)?;

        Ok(RunConfig {
            jira_base_url: self.jira_base_url,
            jira_filter: self.jira_filter,
            credentials,
            destination,
            output_filename: self.output_filename,
            timeout_seconds: self
                .timeout_seconds
                .or_else(|| settings.timeout_seconds())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            accept_invalid_certs: self.insecure || settings.accept_invalid_certs(),
            max_results: self.max_results.or_else(|| settings.max_results()),
            multi_value_field_types: settings.multi_value_field_types(),
            pretty: self.pretty || settings.pretty(),
        })
    }
}
