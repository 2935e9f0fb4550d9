use newsfeed::{views::StoryType, Bundle, HostDocument, MountConfig, Mounted, Network};

use crate::{cli_input::ShowCommand, config::Config, errors::CliError};

#[tokio::main]
pub(crate) async fn show(config: &Config, command: &ShowCommand) -> Result<(), CliError> {
    let (document, _) = render(config, command.story_type).await?;

    print!("{document}");

    Ok(())
}

/// Mounts the story list into a page holding the configured element, then applies
/// `story_type` if it differs from the initial selection.
pub(crate) async fn render(
    config: &Config,
    story_type: Option<StoryType>,
) -> Result<(HostDocument, Mounted), CliError> {
    let bundle = Bundle::load(&config.build.output)?;
    let mut document = HostDocument::new().with_element(config.mount.element.as_str());

    let mount_config = MountConfig {
        network: Network::http(config.network.url.clone()),
        element: config.mount.element.clone(),
    };

    let mut mounted = newsfeed::mount(&mut document, mount_config, &bundle).await?;

    if let Some(story_type) = story_type.filter(|story_type| *story_type != mounted.view().selected()) {
        mounted.select(&mut document, story_type).await?;
    }

    Ok((document, mounted))
}
