use std::io::Write;

use newsfeed::views::StoryType;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{config::Config, errors::CliError, output::report, show};

#[tokio::main]
pub(crate) async fn browse(config: &Config) -> Result<(), CliError> {
    let stdin = BufReader::new(tokio::io::stdin());

    run(config, stdin, &mut std::io::stdout()).await
}

/// Prints the mounted page, then applies each story type read from `input` and prints the
/// page again. Unknown story types are reported and skipped.
pub(crate) async fn run(
    config: &Config,
    input: impl AsyncBufRead + Unpin,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let (mut document, mut mounted) = show::render(config, None).await?;

    write!(output, "{document}").map_err(CliError::Stdout)?;

    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await.map_err(CliError::Stdin)? {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        match line.parse::<StoryType>() {
            Ok(story_type) => {
                mounted.select(&mut document, story_type).await?;
                write!(output, "{document}").map_err(CliError::Stdout)?;
            }
            Err(error) => report::recoverable(&error),
        }
    }

    Ok(())
}
