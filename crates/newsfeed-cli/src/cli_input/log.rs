use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors from newsfeed libraries
    Error,
    /// Warnings and errors from newsfeed libraries
    Warn,
    /// Info, warning and error messages from newsfeed libraries
    Info,
    /// Debug, info, warning and error messages from newsfeed libraries
    Debug,
    /// Trace, debug, info, warning and error messages from all dependencies
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(self) -> &'static str {
        // `newsfeed` also covers the `newsfeed_cli` and `newsfeed_introspection` targets
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "newsfeed=error,query_metadata=error,query_binding=error,off",
            LogLevel::Warn => "newsfeed=warn,query_metadata=warn,query_binding=warn,off",
            LogLevel::Info => "newsfeed=info,query_metadata=info,query_binding=info,off",
            LogLevel::Debug => "newsfeed=debug,query_metadata=debug,query_binding=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogStyle {
    /// Standard text
    Text,
    /// JSON objects
    Json,
}

impl AsRef<str> for LogStyle {
    fn as_ref(&self) -> &str {
        match self {
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::*;

    #[test]
    fn every_level_is_a_valid_filter() {
        for level in LogLevel::value_variants() {
            assert!(EnvFilter::try_new(level.as_filter_str()).is_ok(), "{level:?}");
        }
    }

    #[test]
    fn style_names_match_their_arguments() {
        for style in LogStyle::value_variants() {
            let argument = style.to_possible_value().unwrap();

            assert_eq!(argument.get_name(), style.to_string());
        }
    }
}
