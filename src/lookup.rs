//! Address lookup abstraction
//!
//! Defines the AddressLookup trait, the Suggestion type, LookupError, and the
//! factory that builds a concrete service from configuration.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::config::LookupConfig;

mod geoapify;

pub use geoapify::GeoapifyClient;

/// Errors that can occur during an address lookup
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Lookup is disabled or has no API key
    #[error("Address lookup not configured: {0}")]
    NotConfigured(String),

    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Service returned a non-success status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Response body could not be understood
    #[error("Parse error: {0}")]
    Parse(String),

    /// Superseded by a newer request
    #[error("Request cancelled")]
    Cancelled,
}

/// One address candidate returned by the lookup service
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Full display text
    pub formatted: String,
    pub lat: f64,
    pub lon: f64,
    /// Street portion, when the service splits it out
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

impl Suggestion {
    pub fn new(formatted: impl Into<String>, lat: f64, lon: f64) -> Self {
        Suggestion {
            formatted: formatted.into(),
            lat,
            lon,
            street: None,
            city: None,
            state: None,
            postcode: None,
        }
    }
}

/// A text-search address service
pub trait AddressLookup: Send + Sync + 'static {
    /// Resolve free text to address candidates, in service order
    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Suggestion>, LookupError>>;
}

/// Build the configured lookup service
///
/// Returns an error when lookup is disabled or no API key is available.
pub fn build_lookup(config: &LookupConfig) -> Result<Arc<dyn AddressLookup>, LookupError> {
    if !config.enabled {
        return Err(LookupError::NotConfigured(
            "lookup is disabled in config".to_string(),
        ));
    }

    let api_key = config.resolved_api_key().ok_or_else(|| {
        LookupError::NotConfigured(format!(
            "missing api_key in [lookup] config and {} is unset",
            crate::config::types::API_KEY_ENV
        ))
    })?;

    let client = GeoapifyClient::new(config, api_key)?;
    Ok(Arc::new(client))
}
