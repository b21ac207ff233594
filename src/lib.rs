pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::MappingConfig};
pub use crate::core::{
    etl::ConvertEngine, pipeline::ConvertPipeline, report::ConversionReport,
};
pub use domain::model::{CandidateLists, OutputFiles, SourceRecord, TargetRecord};
pub use utils::error::{ConvertError, Result};
