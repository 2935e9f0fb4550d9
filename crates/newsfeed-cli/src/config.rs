use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

const SCHEMA_URL: &str = "https://www.graphqlhub.com/graphql";
const NETWORK_URL: &str = "http://www.graphqlHub.com/graphql";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// returned if the configuration file exists but cannot be read
    #[error("could not read the configuration file '{0}'\nCaused by: {1}")]
    Read(PathBuf, io::Error),
    /// returned if the configuration file is not valid TOML or has unknown keys
    #[error("the configuration file '{0}' is invalid\nCaused by: {1}")]
    Parse(PathBuf, toml::de::Error),
}

/// Reads `path`, falling back to the defaults when the file does not exist.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        Err(error) => return Err(ConfigError::Read(path.to_path_buf(), error)),
    };

    toml::from_str(&contents).map_err(|error| ConfigError::Parse(path.to_path_buf(), error))
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schema: SchemaConfig,
    pub build: BuildConfig,
    pub network: NetworkConfig,
    pub mount: MountConfig,
}

/// Where the schema is introspected from and cached to.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub url: Url,
    pub artifact: PathBuf,
    /// Request timeout in seconds. No timeout unless set.
    pub timeout: Option<u64>,
}

impl SchemaConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            url: default_url(SCHEMA_URL),
            artifact: PathBuf::from("schema.json"),
            timeout: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// The route whose query the application mounts.
    pub entry: String,
    pub output: PathBuf,
    pub abort_on_error: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: newsfeed::ROUTE_NAME.to_owned(),
            output: PathBuf::from("newsfeed.bundle.json"),
            abort_on_error: true,
        }
    }
}

/// The endpoint route queries are sent to at runtime.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: Url,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            url: default_url(NETWORK_URL),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MountConfig {
    pub element: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            element: "container".to_owned(),
        }
    }
}

fn default_url(url: &str) -> Url {
    Url::parse(url).expect("default urls are valid")
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.schema.url.as_str(), "https://www.graphqlhub.com/graphql");
        assert_eq!(config.schema.artifact, Path::new("schema.json"));
        assert_eq!(config.schema.timeout(), None);
        assert_eq!(config.build.entry, "HackerNewsRoute");
        assert_eq!(config.build.output, Path::new("newsfeed.bundle.json"));
        assert!(config.build.abort_on_error);
        assert_eq!(config.network.url.host_str(), Some("www.graphqlhub.com"));
        assert_eq!(config.network.url.scheme(), "http");
        assert_eq!(config.mount.element, "container");
    }

    #[test]
    fn values() {
        let input = indoc! {r#"
            [schema]
            url = "http://localhost:4000/graphql"
            artifact = "target/schema.json"
            timeout = 30

            [build]
            output = "dist/bundle.json"
            abort_on_error = false

            [mount]
            element = "root"
        "#};

        let config: Config = toml::from_str(input).unwrap();

        assert_eq!(config.schema.url.as_str(), "http://localhost:4000/graphql");
        assert_eq!(config.schema.artifact, Path::new("target/schema.json"));
        assert_eq!(config.schema.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.build.entry, "HackerNewsRoute");
        assert_eq!(config.build.output, Path::new("dist/bundle.json"));
        assert!(!config.build.abort_on_error);
        assert_eq!(config.mount.element, "root");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let input = indoc! {r#"
            [schema]
            endpoint = "http://localhost:4000/graphql"
        "#};

        let error = toml::from_str::<Config>(input).unwrap_err();

        assert!(error.to_string().contains("unknown field `endpoint`"), "{error}");
    }

    #[test]
    fn invalid_url() {
        let input = indoc! {r#"
            [network]
            url = "not a url"
        "#};

        assert!(toml::from_str::<Config>(input).is_err());
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("newsfeed.toml")).unwrap();

        assert_eq!(config.mount.element, "container");
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsfeed.toml");
        std::fs::write(&path, "[build\n").unwrap();

        let error = load(&path).unwrap_err();

        assert!(matches!(&error, ConfigError::Parse(file, _) if *file == path));
    }
}
