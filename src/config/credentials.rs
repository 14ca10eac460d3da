use crate::utils::error::{ExportError, Result};
use std::fmt;
use std::path::Path;

/// Jira account used for the export. The file format is two lines:
/// username, then password. No escaping.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigError {
            message: format!("cannot read credentials file {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().map(str::trim_end);

        let (Some(username), Some(password)) = (lines.next(), lines.next()) else {
            return Err(ExportError::ConfigError {
                message: "credentials file must contain a username line and a password line"
                    .to_string(),
            });
        };

        if username.is_empty() {
            return Err(ExportError::ConfigError {
                message: "credentials file has an empty username line".to_string(),
            });
        }

        Ok(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
