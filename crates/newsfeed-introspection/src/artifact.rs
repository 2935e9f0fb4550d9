use std::{fs, path::Path};

use crate::{ArtifactError, SchemaDocument};

impl SchemaDocument {
    /// Writes the document to `path` as pretty JSON. The file is written next to its final
    /// location first and then renamed, so an interrupted write never leaves a truncated
    /// artifact behind.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ArtifactError::Write(parent.to_path_buf(), error))?;
        }

        let contents = serde_json::to_vec_pretty(self.as_value())
            .map_err(|error| ArtifactError::Corrupt(path.to_path_buf(), error))?;

        let partial = path.with_extension("partial");

        fs::write(&partial, contents).map_err(|error| ArtifactError::Write(partial.clone(), error))?;
        fs::rename(&partial, path).map_err(|error| ArtifactError::Write(path.to_path_buf(), error))?;

        tracing::debug!(path = %path.display(), "wrote schema artifact");

        Ok(())
    }

    /// Reads a document previously written by [`SchemaDocument::save`].
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let contents = fs::read(path).map_err(|error| ArtifactError::Read(path.to_path_buf(), error))?;

        let value =
            serde_json::from_slice(&contents).map_err(|error| ArtifactError::Corrupt(path.to_path_buf(), error))?;

        Ok(SchemaDocument::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HACKERNEWS: &[u8] = include_bytes!("../tests/fixtures/hackernews_introspection.json");

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("schema.json");
        let document = SchemaDocument::from_response_body(HACKERNEWS).unwrap();

        document.save(&path).unwrap();

        assert_eq!(SchemaDocument::load(&path).unwrap(), document);
        assert!(!path.with_extension("partial").exists());
    }

    #[test]
    fn missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let error = SchemaDocument::load(&dir.path().join("schema.json")).unwrap_err();

        assert!(matches!(error, ArtifactError::Read(..)));
    }

    #[test]
    fn corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ not json").unwrap();

        let error = SchemaDocument::load(&path).unwrap_err();

        assert!(matches!(error, ArtifactError::Corrupt(..)));
    }
}
