use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to fetch export from {url}: {message}")]
    FetchError { url: String, message: String },

    #[error("Jira rejected the credentials for {url} (HTTP {status})")]
    CredentialsRejected { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Export document structure error: {message}")]
    StructureError { message: String },

    #[error("Record {position} ({key}) is missing required field '{field}'")]
    RecordStructureError {
        position: usize,
        key: String,
        field: String,
    },

    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Failed to publish '{name}' to {destination}: {message}")]
    PublishError {
        destination: String,
        name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Document,
    Destination,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchError { .. } | Self::CredentialsRejected { .. } | Self::HttpError(_) => {
                ErrorCategory::Source
            }
            Self::StructureError { .. } | Self::RecordStructureError { .. } | Self::XmlError(_) => {
                ErrorCategory::Document
            }
            Self::PublishError { .. } => ErrorCategory::Destination,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 決定退出碼的嚴重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 來源或目的地暫時不可用，稍後重跑即可
            ErrorCategory::Source | ErrorCategory::Destination => ErrorSeverity::Medium,
            ErrorCategory::Document | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CredentialsRejected { .. } => {
                "Check the username and password in the Jira credentials file"
            }
            Self::FetchError { .. } | Self::HttpError(_) => {
                "Check the Jira base URL and network connectivity, then rerun the export"
            }
            Self::StructureError { .. } | Self::XmlError(_) => {
                "Verify the Jira filter ID and that the export is a search-request XML feed"
            }
            Self::RecordStructureError { .. } => {
                "Inspect the named issue in Jira for missing standard fields"
            }
            Self::PublishError { .. } => {
                "Check the destination bucket name, AWS credentials and bucket permissions"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the command-line arguments or settings file and try again"
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check local disk space and temporary directory permissions"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Source => format!("Could not download assessment data: {}", self),
            ErrorCategory::Document => format!("Assessment export is not usable: {}", self),
            ErrorCategory::Destination => format!("Could not store assessment JSON: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
