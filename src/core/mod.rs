pub mod disambiguator;
pub mod etl;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use crate::domain::model::{
    CandidateLists, ColumnSample, ConversionResult, ExtractedData, LoadedFiles, OutputFiles,
    SourceRecord, TargetRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
