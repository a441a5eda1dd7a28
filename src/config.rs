//! Configuration loading
//!
//! Reads `~/.config/orderdesk/config.toml`. A missing default file means
//! defaults; a malformed one means defaults plus a warning. A path passed
//! explicitly on the command line must load or startup fails.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::OrderDeskError;
use crate::stores::{Store, StoreDirectory};

pub mod types;

pub use types::{BiasPoint, Config, LookupConfig};

const CONFIG_DIR: &str = "orderdesk";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration plus an optional warning for the status line
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the default config file, never failing
pub fn load_config() -> ConfigResult {
    let Some(path) = config_path() else {
        return ConfigResult::default();
    };

    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return ConfigResult::default();
    }

    match load_config_from_path(&path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(e.to_string()),
            }
        }
    }
}

/// Load a config file, reporting read and parse failures
pub fn load_config_from_path(path: &Path) -> Result<Config, OrderDeskError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OrderDeskError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&contents).map_err(|message| OrderDeskError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str::<Config>(contents).map_err(|e| e.to_string())
}

/// Resolved `[lookup]` section as printed by `--print-config`
#[derive(Serialize)]
struct LookupView<'a> {
    enabled: bool,
    endpoint: &'a str,
    /// `<set>` or `<missing>`, never the key itself
    api_key: &'static str,
    limit: u8,
    country: Option<&'a str>,
    lang: &'a str,
    debounce_ms: u64,
    min_chars: usize,
    // Tables must follow plain values
    bias: Option<BiasPoint>,
}

#[derive(Serialize)]
struct ConfigView<'a> {
    lookup: LookupView<'a>,
    stores: &'a [Store],
}

/// TOML dump of the resolved config with the API key redacted
pub fn describe(config: &Config) -> Result<String, toml::ser::Error> {
    let lookup = &config.lookup;
    let directory = StoreDirectory::from_config(config);

    let view = ConfigView {
        lookup: LookupView {
            enabled: lookup.enabled,
            endpoint: &lookup.endpoint,
            api_key: match lookup.resolved_api_key() {
                Some(_) => "<set>",
                None => "<missing>",
            },
            limit: lookup.limit,
            country: lookup.country.as_deref(),
            lang: &lookup.lang,
            debounce_ms: lookup.debounce_ms,
            min_chars: lookup.min_chars,
            bias: lookup.bias,
        },
        stores: directory.stores(),
    };
    toml::to_string(&view)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
