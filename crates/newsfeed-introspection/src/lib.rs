#![cfg_attr(test, allow(unused_crate_dependencies))]

mod artifact;
mod document;
mod errors;

pub use cynic_introspection::Schema;
pub use document::SchemaDocument;
pub use errors::{ArtifactError, DocumentError, FetchError};

use cynic::QueryBuilder;
use cynic_introspection::IntrospectionQuery;
use reqwest::header::{ACCEPT, USER_AGENT};

/// Runs the standard introspection query against `url` and returns the schema document
/// found under the response's top-level `data` key.
///
/// The query travels in the `query` parameter of a GET request. The document is checked to
/// describe a usable schema before it is returned.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    headers: &[(impl AsRef<str>, impl AsRef<str>)],
) -> Result<SchemaDocument, FetchError> {
    let operation = IntrospectionQuery::build(());

    let mut request_builder = client
        .get(url)
        .header(USER_AGENT, "newsfeed")
        .header(ACCEPT, "application/json")
        .query(&[("query", operation.query.as_str())]);

    for (name, value) in headers {
        request_builder = request_builder.header(name.as_ref(), value.as_ref());
    }

    tracing::debug!(url, "sending introspection query");

    let response = request_builder.send().await.map_err(FetchError::Request)?;
    let response = response.error_for_status().map_err(FetchError::Status)?;
    let body = response.bytes().await.map_err(FetchError::Request)?;

    let document = SchemaDocument::from_response_body(&body)?;

    tracing::info!(url, types = document.type_count(), "fetched schema");

    Ok(document)
}

/// Pretty prints SDL, returning the input untouched when it does not parse.
pub fn prettify(sdl: String) -> String {
    match cynic_parser::parse_type_system_document(&sdl) {
        Ok(parsed) => parsed.to_sdl_pretty(),
        Err(_) => sdl,
    }
}
