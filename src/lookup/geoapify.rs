//! Geoapify autocomplete client
//!
//! Plain GET with query parameters; the JSON body is a `results` array of
//! formatted addresses with coordinates.

use futures::future::BoxFuture;
use serde::Deserialize;

use super::{AddressLookup, LookupError, Suggestion};
use crate::config::{BiasPoint, LookupConfig};

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<AutocompleteResult>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResult {
    formatted: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    address_line1: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state_code: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
}

impl From<AutocompleteResult> for Suggestion {
    fn from(r: AutocompleteResult) -> Self {
        Suggestion {
            formatted: r.formatted,
            lat: r.lat,
            lon: r.lon,
            street: r.address_line1,
            city: r.city,
            state: r.state_code.map(|s| s.to_uppercase()),
            postcode: r.postcode,
        }
    }
}

/// Geoapify geocoding autocomplete client
#[derive(Debug)]
pub struct GeoapifyClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    limit: u8,
    country: Option<String>,
    lang: String,
    bias: Option<BiasPoint>,
}

impl GeoapifyClient {
    pub fn new(config: &LookupConfig, api_key: String) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LookupError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            limit: config.limit,
            country: config.country.clone(),
            lang: config.lang.clone(),
            bias: config.bias,
        })
    }

    /// Query string parameters for a lookup of `text`
    fn query_params(&self, text: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("text", text.to_string()),
            ("format", "json".to_string()),
            ("limit", self.limit.to_string()),
            ("apiKey", self.api_key.clone()),
            ("lang", self.lang.clone()),
        ];
        if let Some(country) = &self.country {
            params.push(("filter", format!("countrycode:{}", country)));
        }
        if let Some(bias) = self.bias {
            params.push(("bias", format!("proximity:{},{}", bias.lon, bias.lat)));
        }
        params
    }

    async fn fetch(&self, text: &str) -> Result<Vec<Suggestion>, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(text))
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;
        parse_response(&body)
    }
}

impl AddressLookup for GeoapifyClient {
    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Suggestion>, LookupError>> {
        Box::pin(self.fetch(query))
    }
}

/// Parse an autocomplete body, keeping service order
fn parse_response(body: &str) -> Result<Vec<Suggestion>, LookupError> {
    let parsed: AutocompleteResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    Ok(parsed.results.into_iter().map(Suggestion::from).collect())
}

#[cfg(test)]
#[path = "geoapify_tests.rs"]
mod geoapify_tests;
