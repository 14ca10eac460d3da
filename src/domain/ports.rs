use crate::domain::model::TransformResult;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Destination for the serialized record set.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human-readable location of `path`, e.g. `s3://bucket/path`.
    fn location(&self, path: &str) -> String;
}

/// Source of the raw export document.
pub trait ExportSource: Send + Sync {
    /// Download the export into `destination`, returning the number of bytes written.
    fn fetch_into(
        &self,
        destination: &Path,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn output_filename(&self) -> &str;
    fn multi_value_field_types(&self) -> &[String];
    fn pretty_output(&self) -> bool;
}

/// The transient working copy of the raw export. The file is removed when
/// this value is dropped.
pub struct RawExport {
    file: tempfile::NamedTempFile,
    pub bytes: u64,
}

impl RawExport {
    pub fn new(file: tempfile::NamedTempFile, bytes: u64) -> Self {
        Self { file, bytes }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read_to_string(&self) -> Result<String> {
        std::fs::read_to_string(self.file.path()).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ExportError::StructureError {
                message: format!("export is not valid UTF-8 text: {}", e),
            },
            _ => ExportError::IoError(e),
        })
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawExport>;
    async fn transform(&self, raw: RawExport) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_export_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<rss/>").unwrap();

        let raw = RawExport::new(file, 6);
        assert_eq!(raw.read_to_string().unwrap(), "<rss/>");
    }

    #[test]
    fn test_non_utf8_export_is_structure_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<rss>\xff</rss>").unwrap();

        let err = RawExport::new(file, 12).read_to_string().unwrap_err();
        assert!(matches!(err, ExportError::StructureError { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
