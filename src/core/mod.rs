pub mod etl;
pub mod export_parser;
pub mod fetcher;
pub mod field_resolver;
pub mod normalizer;
pub mod pipeline;
pub mod record_transform;
pub mod xml_tree;

pub use crate::domain::model::{NormalizedRecord, RawExportRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, ExportSource, Pipeline, RawExport, Storage};
pub use crate::utils::error::Result;
