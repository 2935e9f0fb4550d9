use newsfeed_introspection::SchemaDocument;
use url::Url;

use crate::{
    cli_input::FetchSchemaCommand,
    config::{Config, SchemaConfig},
    errors::CliError,
    output::report,
};

#[tokio::main]
pub(crate) async fn fetch_schema(config: &Config, command: &FetchSchemaCommand) -> Result<(), CliError> {
    let url = command.url().unwrap_or(&config.schema.url);
    let headers = command.headers().collect::<Vec<_>>();

    fetch_and_save(&config.schema, url, &headers).await?;

    Ok(())
}

/// Introspects `url` and writes the result to the configured artifact. The artifact is
/// left untouched when the fetch fails.
pub(crate) async fn fetch_and_save(
    config: &SchemaConfig,
    url: &Url,
    headers: &[(&str, &str)],
) -> Result<SchemaDocument, CliError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    let client = builder.build().map_err(CliError::HttpClient)?;
    let document = newsfeed_introspection::fetch(&client, url.as_str(), headers).await?;

    document.save(&config.artifact)?;

    report::schema_fetched(url, &config.artifact, document.type_count());

    Ok(document)
}
