use crate::domain::model::{
    CandidateLists, ColumnSample, ConversionResult, ExtractedData, LoadedFiles, OutputFiles,
};
use crate::utils::error::Result;
use std::path::PathBuf;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Writes `data` under `name` and returns the full path written.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn debug(&self) -> bool;
    fn candidates(&self) -> &CandidateLists;
    fn output_files(&self) -> &OutputFiles;
}

pub trait Pipeline {
    fn extract(&self) -> Result<ExtractedData>;
    /// Column overview of the first data row, for the report.
    fn analyze(&self, data: &ExtractedData) -> Vec<ColumnSample>;
    fn transform(&self, data: ExtractedData) -> Result<ConversionResult>;
    fn load(&self, result: &ConversionResult) -> Result<LoadedFiles>;
}
