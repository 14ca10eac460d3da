use crate::core::normalizer::Normalizer;
use crate::core::record_transform::RecordTransformer;
use crate::domain::model::TransformResult;
use crate::domain::ports::{ConfigProvider, ExportSource, Pipeline, RawExport, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Jira export → normalized JSON → storage.
pub struct ExportPipeline<F: ExportSource, S: Storage, C: ConfigProvider> {
    source: F,
    storage: S,
    config: C,
    normalizer: Normalizer,
    work_dir: Option<PathBuf>,
}

impl<F: ExportSource, S: Storage, C: ConfigProvider> ExportPipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        let transformer = RecordTransformer::new(config.multi_value_field_types());
        let normalizer = Normalizer::new(transformer).with_pretty_output(config.pretty_output());
        Self {
            source,
            storage,
            config,
            normalizer,
            work_dir: None,
        }
    }

    /// Keep the working copy in `dir` instead of the system temp directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }
}

#[async_trait::async_trait]
impl<F: ExportSource, S: Storage, C: ConfigProvider> Pipeline for ExportPipeline<F, S, C> {
    async fn extract(&self) -> Result<RawExport> {
        // 暫存檔在 RawExport 被 drop 時刪除
        let mut builder = tempfile::Builder::new();
        builder.prefix("asmt-export-").suffix(".xml");
        let file = match &self.work_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        tracing::info!("📡 Downloading export from {}", self.source.describe());
        let bytes = self.source.fetch_into(file.path()).await?;
        tracing::debug!("Export saved to {} ({} bytes)", file.path().display(), bytes);

        Ok(RawExport::new(file, bytes))
    }

    async fn transform(&self, raw: RawExport) -> Result<TransformResult> {
        let document = raw.read_to_string()?;
        drop(raw);

        self.normalizer.normalize(&document)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let name = self.config.output_filename();
        self.storage.write_file(name, &result.payload).await?;
        Ok(self.storage.location(name))
    }
}
