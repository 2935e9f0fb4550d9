use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// returned if the request could not be sent or its body could not be read
    #[error("could not reach the schema endpoint\nCaused by: {0}")]
    Request(reqwest::Error),
    /// returned if the endpoint answered with a non-success status
    #[error("the schema endpoint answered with an error status\nCaused by: {0}")]
    Status(reqwest::Error),
    /// returned if the response body is not JSON
    #[error("the schema endpoint returned malformed JSON\nCaused by: {0}")]
    MalformedJson(serde_json::Error),
    /// returned if the response carries GraphQL errors
    #[error("the schema endpoint returned errors: {0}")]
    GraphQl(String),
    /// returned if the response has no top-level `data`
    #[error("the introspection response has no data")]
    MissingData,
    /// returned if `data` does not describe a schema
    #[error(transparent)]
    InvalidSchema(DocumentError),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("the schema document is not an introspection result\nCaused by: {0}")]
    Shape(serde_json::Error),
    #[error("the schema document describes an invalid schema\nCaused by: {0}")]
    Schema(cynic_introspection::SchemaError),
}

#[derive(Error, Debug)]
pub enum ArtifactError {
    /// returned if the artifact file could not be read
    #[error("could not read the schema artifact '{0}'\nCaused by: {1}")]
    Read(PathBuf, io::Error),
    /// returned if the artifact file or its directory could not be written
    #[error("could not write the schema artifact '{0}'\nCaused by: {1}")]
    Write(PathBuf, io::Error),
    /// returned if the artifact file is not JSON
    #[error("the schema artifact '{0}' is corrupt\nCaused by: {1}")]
    Corrupt(PathBuf, serde_json::Error),
}
