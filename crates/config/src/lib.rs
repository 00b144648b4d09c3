use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "lightbnb.toml",
    "config/lightbnb.toml",
    "crates/config/lightbnb.toml",
    "../lightbnb.toml",
    "../config/lightbnb.toml",
    "../crates/config/lightbnb.toml",
];

/// Number of rows returned by list queries when the caller does not say otherwise.
pub const DEFAULT_QUERY_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub queries: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://lightbnb.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Defaults applied to the list operations of the data access layer.
///
/// ```
/// use lightbnb_config::QueryConfig;
///
/// let queries = QueryConfig::default();
/// assert_eq!(queries.default_limit, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "QueryConfig::default_limit")]
    pub default_limit: u32,
}

impl QueryConfig {
    const fn default_limit() -> u32 {
        DEFAULT_QUERY_LIMIT
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::default_limit(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use lightbnb_config::load;
///
/// std::env::remove_var("LIGHTBNB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default(
            "queries.default_limit",
            i64::from(defaults.queries.default_limit),
        )?;

    let environment_overrides = config::Environment::with_prefix("LIGHTBNB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("LIGHTBNB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via LIGHTBNB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded configuration");
    Ok(config)
}
