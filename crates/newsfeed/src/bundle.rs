use std::{fs, path::Path};

use query_metadata::{Metadata, QueryMetadata};
use serde::{Deserialize, Serialize};

use crate::BundleError;

/// The output of a build: the generated metadata and the route the application enters
/// through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub entry: String,
    pub metadata: Metadata,
}

impl Bundle {
    /// Fails if the metadata has no query for `entry`.
    pub fn new(entry: impl Into<String>, metadata: Metadata) -> Result<Self, BundleError> {
        let bundle = Bundle {
            entry: entry.into(),
            metadata,
        };

        bundle.entry_query()?;

        Ok(bundle)
    }

    pub fn entry_query(&self) -> Result<&QueryMetadata, BundleError> {
        self.metadata
            .query(&self.entry)
            .ok_or_else(|| BundleError::MissingEntry(self.entry.clone()))
    }

    /// Writes the bundle as pretty JSON through a temporary file, so that a failed write
    /// never leaves a partial bundle at `path`.
    pub fn save(&self, path: &Path) -> Result<(), BundleError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| BundleError::Write(parent.to_path_buf(), error))?;
        }

        let mut contents =
            serde_json::to_string_pretty(self).map_err(|error| BundleError::Corrupt(path.to_path_buf(), error))?;
        contents.push('\n');

        let partial = path.with_extension("partial");

        fs::write(&partial, contents).map_err(|error| BundleError::Write(partial.clone(), error))?;
        fs::rename(&partial, path).map_err(|error| BundleError::Write(path.to_path_buf(), error))?;

        tracing::debug!(path = %path.display(), "wrote bundle");

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let contents = fs::read_to_string(path).map_err(|error| BundleError::Read(path.to_path_buf(), error))?;

        serde_json::from_str(&contents).map_err(|error| BundleError::Corrupt(path.to_path_buf(), error))
    }
}
