use std::io::{self, ErrorKind};

use newsfeed::{BundleError, MountError, RuntimeError};
use newsfeed_introspection::{ArtifactError, DocumentError, FetchError};
use query_metadata::Diagnostics;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// returned if the HTTP client cannot be set up
    #[error("could not create an HTTP client\nCaused by: {0}")]
    HttpClient(reqwest::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// returned if the declared fragments do not hold against the schema
    #[error("the fragments did not validate against the schema:\n{0}")]
    Generate(Diagnostics),
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error(transparent)]
    Mount(#[from] MountError),
    /// returned if reading story types from stdin fails
    #[error("could not read from stdin\nCaused by: {0}")]
    Stdin(io::Error),
    /// returned if the rendered page cannot be written
    #[error("could not write to stdout\nCaused by: {0}")]
    Stdout(io::Error),
}

impl CliError {
    pub fn to_hint(&self) -> Option<String> {
        match self {
            Self::Artifact(ArtifactError::Read(_, error)) if error.kind() == ErrorKind::NotFound => {
                Some("try running 'newsfeed fetch-schema' first".to_owned())
            }
            Self::Artifact(ArtifactError::Corrupt(..)) | Self::Document(_) => {
                Some("try fetching the schema again with 'newsfeed fetch-schema'".to_owned())
            }
            Self::Fetch(FetchError::Request(_)) => Some(
                "this may be caused by connection issues or by an incorrect url in the [schema] section".to_owned(),
            ),
            Self::Generate(_) => Some(
                "fix the reported selections, or run 'newsfeed build --best-effort' to leave them out".to_owned(),
            ),
            Self::Bundle(BundleError::Read(_, error)) if error.kind() == ErrorKind::NotFound => {
                Some("try running 'newsfeed build' first".to_owned())
            }
            Self::Bundle(BundleError::MissingEntry(_)) => {
                Some("check the `entry` value of the [build] section".to_owned())
            }
            Self::Mount(MountError::ElementNotFound(_)) => {
                Some("check the `element` value of the [mount] section".to_owned())
            }
            Self::Mount(MountError::EntryMismatch { route, .. }) => Some(format!(
                "set the `entry` value of the [build] section to `{route}` and run 'newsfeed build'"
            )),
            Self::Mount(MountError::MissingQuery(_)) => {
                Some("the bundle is out of date, try running 'newsfeed build'".to_owned())
            }
            Self::Mount(MountError::Runtime(RuntimeError::Network(_))) => Some(
                "this may be caused by connection issues or by an incorrect url in the [network] section".to_owned(),
            ),
            _ => None,
        }
    }
}
