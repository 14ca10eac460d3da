#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;
pub mod toml_config;

use crate::config::credentials::Credentials;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Where the serialized record set goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    S3 {
        bucket: String,
        region: Option<String>,
    },
    Local {
        directory: String,
    },
}

/// Everything one export run needs, resolved from the command line and the
/// optional settings file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub jira_base_url: String,
    pub jira_filter: String,
    pub credentials: Credentials,
    pub destination: Destination,
    pub output_filename: String,
    pub timeout_seconds: u64,
    pub accept_invalid_certs: bool,
    pub max_results: Option<u32>,
    pub multi_value_field_types: Vec<String>,
    pub pretty: bool,
}

impl RunConfig {
    /// Config with defaults for everything but the required inputs.
    pub fn new(
        jira_base_url: impl Into<String>,
        jira_filter: impl Into<String>,
        credentials: Credentials,
        destination: Destination,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            jira_base_url: jira_base_url.into(),
            jira_filter: jira_filter.into(),
            credentials,
            destination,
            output_filename: output_filename.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            accept_invalid_certs: false,
            max_results: None,
            multi_value_field_types: Vec::new(),
            pretty: false,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn output_filename(&self) -> &str {
        &self.output_filename
    }

    fn multi_value_field_types(&self) -> &[String] {
        &self.multi_value_field_types
    }

    fn pretty_output(&self) -> bool {
        self.pretty
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("jira_base_url", &self.jira_base_url)?;
        validation::validate_filter_id("jira_filter", &self.jira_filter)?;
        validation::validate_object_name("output_filename", &self.output_filename)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 3600)?;

        if let Some(max_results) = self.max_results {
            validation::validate_range("max_results", max_results, 1, 100_000)?;
        }

        match &self.destination {
            Destination::S3 { bucket, region } => {
                validation::validate_s3_bucket_name("s3_bucket", bucket)?;
                if let Some(region) = region {
                    validation::validate_aws_region("s3_region", region)?;
                }
            }
            Destination::Local { directory } => {
                validation::validate_non_empty_string("output_dir", directory)?;
            }
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(destination: Destination) -> RunConfig {
        RunConfig::new(
            "https://jira.example.com",
            "12345",
            Credentials::new("analyst", "secret"),
            destination,
            "assessments.json",
        )
    }

    #[test]
    fn test_valid_s3_config() {
        let config = config(Destination::S3 {
            bucket: "assessment-data".to_string(),
            region: Some("us-east-1".to_string()),
        });
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut bad_bucket = config(Destination::S3 {
            bucket: "Bad_Bucket".to_string(),
            region: None,
        });
        assert!(bad_bucket.validate().is_err());

        bad_bucket.destination = Destination::Local {
            directory: "./out".to_string(),
        };
        assert!(bad_bucket.validate().is_ok());

        let mut bad_url = bad_bucket.clone();
        bad_url.jira_base_url = "jira.example.com".to_string();
        assert!(bad_url.validate().is_err());

        let mut bad_timeout = bad_bucket.clone();
        bad_timeout.timeout_seconds = 0;
        assert!(bad_timeout.validate().is_err());

        let mut bad_filter = bad_bucket;
        bad_filter.jira_filter = "1/../2".to_string();
        assert!(bad_filter.validate().is_err());
    }
}
