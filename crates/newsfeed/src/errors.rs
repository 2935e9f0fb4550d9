use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// returned if the request could not be sent or its body could not be read
    #[error("could not reach the GraphQL endpoint\nCaused by: {0}")]
    Network(reqwest::Error),
    /// returned if the endpoint answered with a non-success status
    #[error("the GraphQL endpoint answered with an error status\nCaused by: {0}")]
    Status(reqwest::Error),
    /// returned if the response body is not a GraphQL response
    #[error("the GraphQL endpoint returned a malformed response\nCaused by: {0}")]
    MalformedResponse(serde_json::Error),
    /// returned if the response carries GraphQL errors
    #[error("the query failed: {0}")]
    GraphQl(String),
    /// returned if the response has no `data`
    #[error("the query returned no data")]
    MissingData,
    /// returned if the data does not have the shape the views select
    #[error("the query returned data the views cannot read\nCaused by: {0}")]
    UnexpectedData(serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MountError {
    #[error("the host document has no element `{0}`")]
    ElementNotFound(String),
    #[error("element `{0}` has already been mounted")]
    AlreadyMounted(String),
    #[error("the bundle has no query for route `{0}`")]
    MissingQuery(String),
    #[error("the bundle was built for route `{bundle}`, but the application mounts `{route}`")]
    EntryMismatch { bundle: String, route: String },
    #[error(transparent)]
    StoryType(#[from] UnknownStoryType),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown story type `{0}`, expected one of: top, new, ask, show")]
pub struct UnknownStoryType(pub String);

#[derive(Error, Debug)]
pub enum BundleError {
    /// returned if the bundle file could not be read
    #[error("could not read the bundle '{0}'\nCaused by: {1}")]
    Read(PathBuf, io::Error),
    /// returned if the bundle file or its directory could not be written
    #[error("could not write the bundle '{0}'\nCaused by: {1}")]
    Write(PathBuf, io::Error),
    /// returned if the bundle file is not a bundle
    #[error("the bundle '{0}' is corrupt\nCaused by: {1}")]
    Corrupt(PathBuf, serde_json::Error),
    /// returned if the generated metadata has no query for the entry route
    #[error("no query was generated for the entry route `{0}`")]
    MissingEntry(String),
}
