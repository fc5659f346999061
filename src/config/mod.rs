use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::search::{MatchMode, SearchOptions, SortMethod};

static CONFIG_FILE: &str = "./MediaTagger.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DbConfig {
    pub location: String,
}

/// the search inputs the application starts with
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: MatchMode,
    pub sort: SortMethod,
    pub exclusion_enabled: bool,
}

impl From<&SearchConfig> for SearchOptions {
    fn from(value: &SearchConfig) -> Self {
        Self {
            mode: value.mode,
            exclusion_enabled: value.exclusion_enabled,
            sort: value.sort,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// one of the `log` level names, case-insensitive
    pub level: String,
    /// log lines are written here as well as to stdout
    pub file: String,
}

/// config properties for the whole of this application. Anything left out of the file keeps its default
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MediaTaggerConfig {
    pub database: DbConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Parses the config file located at ./MediaTagger.toml, if it exists.
/// If the file is missing or can't be parsed, the defaults are used
pub fn parse_config() -> MediaTaggerConfig {
    load_config(config::File::with_name(CONFIG_FILE))
}

/// parses config from a toml string instead of the config file
pub fn parse_config_str(contents: &str) -> MediaTaggerConfig {
    load_config(config::File::from_str(contents, config::FileFormat::Toml))
}

fn load_config<S>(source: S) -> MediaTaggerConfig
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = Config::builder()
        .add_source(source)
        .build();
    let settings = match builder {
        Ok(settings) => settings,
        // some errors are fine, such as not found
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing with defaults...");
            return MEDIA_TAGGER_CONFIG_DEFAULT.clone();
        }
        Err(e) => {
            log::error!("Failed to parse config file, falling back to defaults. Exception is {e}");
            return MEDIA_TAGGER_CONFIG_DEFAULT.clone();
        }
    };
    settings.try_deserialize().unwrap_or_else(|e| {
        log::error!("Failed to read config values, falling back to defaults. Exception is {e}");
        MEDIA_TAGGER_CONFIG_DEFAULT.clone()
    })
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static MEDIA_TAGGER_CONFIG: Lazy<MediaTaggerConfig> = Lazy::new(parse_config);
static MEDIA_TAGGER_CONFIG_DEFAULT: Lazy<MediaTaggerConfig> = Lazy::new(MediaTaggerConfig::default);

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            location: "./media_tagger.sqlite".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Any,
            sort: SortMethod::Name,
            exclusion_enabled: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "./media_tagger.log".to_string(),
        }
    }
}
