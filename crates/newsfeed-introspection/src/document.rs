use cynic_introspection::{IntrospectionQuery, Schema};
use serde::Deserialize;
use serde_json::Value;

use crate::{DocumentError, FetchError};

/// The schema as the server described it: the value found under the `data` key of an
/// introspection response. It is kept as raw JSON so it can be cached byte for byte and
/// interpreted later, offline.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument(Value);

/// A GraphQL response where both keys may be absent or null.
#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<cynic::GraphQlError>>,
}

impl SchemaDocument {
    /// Extracts the schema document from a raw introspection response body.
    pub fn from_response_body(body: &[u8]) -> Result<Self, FetchError> {
        let Response { data, errors } = serde_json::from_slice(body).map_err(FetchError::MalformedJson)?;

        if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
            let messages = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            return Err(FetchError::GraphQl(messages));
        }

        let Some(data) = data.filter(|data| !data.is_null()) else {
            return Err(FetchError::MissingData);
        };

        let document = SchemaDocument(data);
        document.to_schema().map_err(FetchError::InvalidSchema)?;

        Ok(document)
    }

    pub(crate) fn from_value(value: Value) -> Self {
        SchemaDocument(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Interprets the document as a schema.
    pub fn to_schema(&self) -> Result<Schema, DocumentError> {
        let query = serde_json::from_value::<IntrospectionQuery>(self.0.clone()).map_err(DocumentError::Shape)?;

        query.into_schema().map_err(DocumentError::Schema)
    }

    /// Renders the document as pretty printed SDL.
    pub fn to_sdl(&self) -> Result<String, DocumentError> {
        Ok(crate::prettify(self.to_schema()?.to_sdl()))
    }

    /// Number of named types in the document, including built-in scalars.
    pub fn type_count(&self) -> usize {
        self.0
            .pointer("/__schema/types")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or_default()
    }
}
