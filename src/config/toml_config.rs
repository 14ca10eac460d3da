use crate::utils::error::{ExportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional settings file (`--settings`). Command-line values win over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    pub source: Option<SourceSettings>,
    pub normalize: Option<NormalizeSettings>,
    pub destination: Option<DestinationSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    pub timeout_seconds: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeSettings {
    /// Field-type identifiers treated as multi-valued in addition to the built-in ones.
    #[serde(default)]
    pub multi_value_field_types: Vec<String>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationSettings {
    pub s3_region: Option<String>,
}

impl SettingsFile {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigError {
            message: format!("cannot read settings file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| ExportError::ConfigValidationError {
            field: "settings".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${S3_REGION})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.source.as_ref().and_then(|s| s.timeout_seconds)
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.source
            .as_ref()
            .and_then(|s| s.accept_invalid_certs)
            .unwrap_or(false)
    }

    pub fn max_results(&self) -> Option<u32> {
        self.source.as_ref().and_then(|s| s.max_results)
    }

    pub fn multi_value_field_types(&self) -> Vec<String> {
        self.normalize
            .as_ref()
            .map(|n| n.multi_value_field_types.clone())
            .unwrap_or_default()
    }

    pub fn pretty(&self) -> bool {
        self.normalize.as_ref().and_then(|n| n.pretty).unwrap_or(false)
    }

    pub fn s3_region(&self) -> Option<String> {
        self.destination.as_ref().and_then(|d| d.s3_region.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_settings() {
        let settings = SettingsFile::from_toml_str(
            r#"
[source]
timeout_seconds = 120
accept_invalid_certs = true
max_results = 2000

[normalize]
multi_value_field_types = ["com.atlassian.jira.plugin.system.customfieldtypes:labels"]
pretty = true

[destination]
s3_region = "us-east-1"
"#,
        )
        .unwrap();

        assert_eq!(settings.timeout_seconds(), Some(120));
        assert!(settings.accept_invalid_certs());
        assert_eq!(settings.max_results(), Some(2000));
        assert_eq!(settings.multi_value_field_types().len(), 1);
        assert!(settings.pretty());
        assert_eq!(settings.s3_region().as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = SettingsFile::from_toml_str("").unwrap();

        assert_eq!(settings.timeout_seconds(), None);
        assert!(!settings.accept_invalid_certs());
        assert!(settings.multi_value_field_types().is_empty());
        assert!(!settings.pretty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ASMT_EXPORT_TEST_REGION", "us-gov-west-1");

        let settings = SettingsFile::from_toml_str(
            r#"
[destination]
s3_region = "${ASMT_EXPORT_TEST_REGION}"
"#,
        )
        .unwrap();
        assert_eq!(settings.s3_region().as_deref(), Some("us-gov-west-1"));

        std::env::remove_var("ASMT_EXPORT_TEST_REGION");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(SettingsFile::from_toml_str("[source\ntimeout_seconds = ").is_err());
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\ntimeout_seconds = 30\n")
            .unwrap();

        let settings = SettingsFile::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.timeout_seconds(), Some(30));
    }

    #[test]
    fn test_missing_settings_file_is_config_error() {
        let err = SettingsFile::from_file("/nonexistent/asmt-export.toml").unwrap_err();

        assert!(matches!(err, ExportError::ConfigError { .. }));
        assert!(err.to_string().contains("/nonexistent/asmt-export.toml"));
        assert_eq!(err.exit_code(), 1);
    }
}
