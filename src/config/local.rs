use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use std::path::Path;

/// Publishes into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        let publish_error = |e: std::io::Error| ExportError::PublishError {
            destination: self.base_path.clone(),
            name: path.to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(publish_error)?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(publish_error)?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        tokio_test::block_on(storage.write_file("nested/out.json", b"[]")).unwrap();

        let written = std::fs::read(temp_dir.path().join("nested/out.json")).unwrap();
        assert_eq!(written, b"[]");
        assert!(storage.location("nested/out.json").ends_with("out.json"));
    }

    #[test]
    fn test_write_failure_is_publish_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());

        let err = tokio_test::block_on(storage.write_file("out.json", b"[]")).unwrap_err();
        assert!(matches!(err, ExportError::PublishError { .. }));
    }
}
