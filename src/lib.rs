pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

#[cfg(feature = "s3")]
pub use config::s3::S3Storage;

pub use config::{credentials::Credentials, local::LocalStorage, Destination, RunConfig};
pub use crate::core::{
    etl::{EtlEngine, ExportReport},
    fetcher::JiraFetcher,
    normalizer::Normalizer,
    pipeline::ExportPipeline,
};
pub use utils::error::{ExportError, Result};
