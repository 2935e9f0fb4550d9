use newsfeed::Bundle;
use newsfeed_introspection::SchemaDocument;
use query_metadata::{Generated, Options};

use crate::{cli_input::BuildCommand, config::Config, errors::CliError, fetch_schema, output::report};

#[tokio::main]
pub(crate) async fn build(config: &Config, command: &BuildCommand) -> Result<(), CliError> {
    run(config, command).await?;

    Ok(())
}

/// Generates the bundle from the cached schema, fetching it first if asked to. Nothing is
/// written unless every step succeeds.
pub(crate) async fn run(config: &Config, command: &BuildCommand) -> Result<Bundle, CliError> {
    let document = if command.refresh_schema {
        let headers = command.headers().collect::<Vec<_>>();
        fetch_schema::fetch_and_save(&config.schema, &config.schema.url, &headers).await?
    } else {
        SchemaDocument::load(&config.schema.artifact)?
    };

    let schema = document.to_schema()?;

    let mut options = Options::default();
    if config.build.abort_on_error && !command.best_effort {
        options |= Options::ABORT_ON_ERROR;
    }

    let Generated { metadata, diagnostics } =
        query_metadata::generate(&schema, &newsfeed::sources(), options).map_err(CliError::Generate)?;

    report::tolerated(&diagnostics);

    let bundle = Bundle::new(config.build.entry.as_str(), metadata)?;

    if command.check {
        report::check_passed(&bundle.entry);
    } else {
        bundle.save(&config.build.output)?;
        report::bundle_written(&bundle.entry, &config.build.output);
    }

    Ok(bundle)
}
