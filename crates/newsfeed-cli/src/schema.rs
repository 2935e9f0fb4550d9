use newsfeed_introspection::SchemaDocument;

use crate::{config::Config, errors::CliError};

pub(crate) fn schema(config: &Config) -> Result<(), CliError> {
    let document = SchemaDocument::load(&config.schema.artifact)?;

    println!("{}", document.to_sdl()?);

    Ok(())
}
