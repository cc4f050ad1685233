use movebank_domain::{DocumentWriter, DomainError, DomainResult, MovebankDocument};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the document as pretty-printed UTF-8 JSON.
///
/// Indentation is two spaces and non-ASCII text is written literally.
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentWriter for JsonFileWriter {
    fn write(&self, document: &MovebankDocument) -> DomainResult<()> {
        let file = File::create(&self.path).map_err(|e| {
            DomainError::DocumentWriteError(format!("{}: {}", self.path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush().map_err(|e| {
            DomainError::DocumentWriteError(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_into_missing_directory_fails() {
        let writer = JsonFileWriter::new("/nonexistent-dir/movebank_data.json");

        let result = writer.write(&MovebankDocument::default());

        assert!(matches!(result, Err(DomainError::DocumentWriteError(_))));
    }
}
