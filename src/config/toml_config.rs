use crate::domain::model::{CandidateLists, OutputFiles};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_candidate_list, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional mapping file that overrides the built-in header candidates and
/// output filenames. Every section and key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub candidates: CandidateLists,
    pub output: OutputFiles,
}

impl MappingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConvertError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for MappingConfig {
    fn validate(&self) -> Result<()> {
        for (field, candidates) in self.candidates.named() {
            validate_candidate_list(&format!("candidates.{}", field), candidates)?;
        }

        validate_path("output.primary", &self.output.primary)?;
        validate_path("output.duplicates", &self.output.duplicates)?;

        if self.output.primary == self.output.duplicates {
            return Err(ConvertError::InvalidConfigValueError {
                field: "output.duplicates".to_string(),
                value: self.output.duplicates.clone(),
                reason: "Duplicates file must differ from the primary file".to_string(),
            });
        }
        Ok(())
    }
}
