use std::{io::IsTerminal as _, path::PathBuf};

use clap::{Parser, Subcommand};
use newsfeed::views::StoryType;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};
use url::Url;

mod log;

use self::log::{LogLevel, LogStyle};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "newsfeed", version)]
#[command(arg_required_else_help = true)]
/// Builds and browses the Hacker News newsfeed
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,
    /// Path to the TOML configuration file. A missing file means defaults
    #[arg(long, short, env = "NEWSFEED_CONFIG_PATH", default_value = "./newsfeed.toml", global = true)]
    pub config: PathBuf,
    /// Set the logging level, overriding RUST_LOG
    #[arg(long = "log", env = "NEWSFEED_LOG", global = true)]
    log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "NEWSFEED_LOG_STYLE", default_value_t = LogStyle::Text, global = true)]
    log_style: LogStyle,
}

impl Args {
    pub fn log_filter(&self) -> Option<&'static str> {
        self.log_level.map(|level| level.as_filter_str())
    }

    /// Logs go to stderr so that rendered output on stdout stays clean.
    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if std::io::stderr().is_terminal() => layer.with_ansi(true).boxed(),
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}

#[derive(Debug, Subcommand, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SubCommand {
    /// Introspect the schema endpoint and cache the result
    FetchSchema(FetchSchemaCommand),
    /// Validate the declared fragments against the cached schema and write the bundle
    Build(BuildCommand),
    /// Print the cached schema as SDL
    Schema,
    /// Mount the story list once and print the rendered page
    Show(ShowCommand),
    /// Mount the story list, then apply story types read from stdin one per line
    Browse,
}

#[derive(Debug, clap::Args)]
pub struct FetchSchemaCommand {
    /// GraphQL URL to introspect, defaults to the `url` of the [schema] section
    #[arg(long)]
    url: Option<Url>,
    /// Add a header to the introspection request, as `name: value`
    #[arg(short = 'H', long, num_args = 0..)]
    header: Vec<String>,
}

impl FetchSchemaCommand {
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header.iter().filter_map(|header| split_header(header))
    }
}

#[derive(Debug, Default, clap::Args)]
pub struct BuildCommand {
    /// Fetch the schema again before building
    #[arg(long)]
    pub refresh_schema: bool,
    /// Add a header to the introspection request of --refresh-schema, as `name: value`
    #[arg(short = 'H', long, num_args = 0.., requires = "refresh_schema")]
    pub header: Vec<String>,
    /// Leave invalid selections out and report them instead of failing the build
    #[arg(long)]
    pub best_effort: bool,
    /// Validate without writing the bundle
    #[arg(long)]
    pub check: bool,
}

impl BuildCommand {
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header.iter().filter_map(|header| split_header(header))
    }
}

#[derive(Debug, clap::Args)]
pub struct ShowCommand {
    /// Select this story type after mounting (top, new, ask or show)
    #[arg(long)]
    pub story_type: Option<StoryType>,
}

fn split_header(header: &str) -> Option<(&str, &str)> {
    header
        .split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
}
