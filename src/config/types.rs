// Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::stores::Store;

/// Default Geoapify autocomplete endpoint
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://api.geoapify.com/v1/geocode/autocomplete";

/// Environment variable consulted when `api_key` is absent from the config
pub const API_KEY_ENV: &str = "ORDERDESK_GEOAPIFY_KEY";

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_LOOKUP_ENDPOINT.to_string()
}

fn default_limit() -> u8 {
    5
}

fn default_country() -> Option<String> {
    Some("us".to_string())
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_bias() -> Option<BiasPoint> {
    Some(BiasPoint::default())
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_chars() -> usize {
    3
}

/// Point the lookup service should prefer results around
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BiasPoint {
    pub lat: f64,
    pub lon: f64,
}

impl Default for BiasPoint {
    fn default() -> Self {
        // Arden, NC showroom
        BiasPoint {
            lat: 35.454432,
            lon: -82.524087,
        }
    }
}

/// Address lookup configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u8,
    #[serde(default = "default_country")]
    pub country: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_bias")]
    pub bias: Option<BiasPoint>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            api_key: None,
            limit: default_limit(),
            country: default_country(),
            lang: default_lang(),
            bias: default_bias(),
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
        }
    }
}

impl LookupConfig {
    /// API key from the config file, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Replaces the built-in store directory when non-empty
    #[serde(default)]
    pub stores: Vec<Store>,
}
