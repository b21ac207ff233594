pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{CandidateLists, OutputFiles};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_existing_file, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "convert")]
#[command(about = "Convert a Proton Pass CSV export into an Apple Passwords import file")]
pub struct CliConfig {
    /// Password-manager CSV export to convert
    pub input: String,

    #[arg(long, help = "Dump column diagnostics for the first rows")]
    pub debug: bool,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// TOML file overriding header candidates and output filenames
    #[arg(long)]
    pub mapping: Option<String>,

    #[arg(skip)]
    pub candidates: CandidateLists,

    #[arg(skip)]
    pub output_files: OutputFiles,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_mapping(&mut self, mapping: toml_config::MappingConfig) {
        self.candidates = mapping.candidates;
        self.output_files = mapping.output;
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_existing_file("input", &self.input)?;
        validate_path("output_dir", &self.output_dir)?;

        toml_config::MappingConfig {
            candidates: self.candidates.clone(),
            output: self.output_files.clone(),
        }
        .validate()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn debug(&self) -> bool {
        self.debug
    }

    fn candidates(&self) -> &CandidateLists {
        &self.candidates
    }

    fn output_files(&self) -> &OutputFiles {
        &self.output_files
    }
}
