use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage. Inputs are read as given; outputs land under `output_dir`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output_dir: String,
}

impl LocalStorage {
    pub fn new(output_dir: String) -> Self {
        Self { output_dir }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = Path::new(&self.output_dir).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested/out");
        let storage = LocalStorage::new(out.to_str().unwrap().to_string());

        let written = storage.write_file("apple_import.csv", b"Title\n").unwrap();
        assert_eq!(written, out.join("apple_import.csv"));
        assert_eq!(fs::read(&written).unwrap(), b"Title\n");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let storage = LocalStorage::new(".".to_string());
        let err = storage.read_file("/no/such/export.csv").unwrap_err();
        assert!(matches!(err, crate::ConvertError::IoError(_)));
    }
}
