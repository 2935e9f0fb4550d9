use std::{ops::Deref, sync::Arc};

use query_binding::{Route, Variables};
use query_metadata::QueryMetadata;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::RuntimeError;

/// The body of a GraphQL POST request.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Variables,
}

#[async_trait::async_trait]
pub trait NetworkLayer: Send + Sync {
    /// Sends one query and returns the `data` of its response.
    async fn send(&self, request: GraphqlRequest<'_>) -> Result<Value, RuntimeError>;
}

/// The transport queries are sent through. Cloning shares the underlying layer.
#[derive(Clone)]
pub struct Network {
    inner: Arc<dyn NetworkLayer>,
}

impl Network {
    pub fn new(layer: impl NetworkLayer + 'static) -> Network {
        Network { inner: Arc::new(layer) }
    }

    /// Sends queries as JSON POST requests to `url`.
    pub fn http(url: Url) -> Network {
        Network::new(HttpNetworkLayer::new(reqwest::Client::new(), url))
    }
}

impl Deref for Network {
    type Target = dyn NetworkLayer;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

/// A GraphQL response where both keys may be absent or null.
#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<cynic::GraphQlError>>,
}

pub struct HttpNetworkLayer {
    client: reqwest::Client,
    url: Url,
}

impl HttpNetworkLayer {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        HttpNetworkLayer { client, url }
    }
}

#[async_trait::async_trait]
impl NetworkLayer for HttpNetworkLayer {
    async fn send(&self, request: GraphqlRequest<'_>) -> Result<Value, RuntimeError> {
        tracing::debug!(url = %self.url, "sending query");

        let response = self
            .client
            .post(self.url.clone())
            .header(USER_AGENT, "newsfeed")
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(RuntimeError::Network)?;

        let response = response.error_for_status().map_err(RuntimeError::Status)?;
        let body = response.bytes().await.map_err(RuntimeError::Network)?;

        let Response { data, errors } = serde_json::from_slice(&body).map_err(RuntimeError::MalformedResponse)?;

        if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
            let messages = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            return Err(RuntimeError::GraphQl(messages));
        }

        data.filter(|data| !data.is_null()).ok_or(RuntimeError::MissingData)
    }
}

/// Receives the variable updates a view requests.
pub trait VariableSink {
    fn set_variables(&mut self, variables: Variables);
}

/// Runs one route's compiled query with the route's current variables.
pub struct RootContainer {
    network: Network,
    route: String,
    root_field: String,
    query: String,
    variables: Variables,
}

impl RootContainer {
    pub fn new(network: Network, route: &Route, query: &QueryMetadata) -> Self {
        RootContainer {
            network,
            route: route.name().to_owned(),
            root_field: query.root_field.clone(),
            query: query.document.clone(),
            variables: route.variables().clone(),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Runs the query and reads the value of the root field as `T`. A missing root field
    /// reads as `null`.
    pub async fn fetch<T: DeserializeOwned>(&self) -> Result<T, RuntimeError> {
        tracing::debug!(route = %self.route, variables = ?self.variables, "running route query");

        let mut data = self
            .network
            .send(GraphqlRequest {
                query: &self.query,
                variables: &self.variables,
            })
            .await?;

        let root = data.get_mut(&self.root_field).map(Value::take).unwrap_or_default();

        serde_json::from_value(root).map_err(RuntimeError::UnexpectedData)
    }
}

impl VariableSink for RootContainer {
    /// Later updates win over earlier ones for the same variable.
    fn set_variables(&mut self, variables: Variables) {
        tracing::debug!(route = %self.route, ?variables, "variables updated");
        self.variables.merge(variables);
    }
}
