use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::domain::ProviderKind;
use crate::errors::{AggregatorError, AggregatorResult};
use crate::providers::traits::QueryParams;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking JSON client shared by the provider adapters
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// GET `url` with `query` and decode the JSON body
    ///
    /// Transport errors drop the request URL, whose query carries the API key.
    pub fn get_json<T: DeserializeOwned>(&self, url: Url, query: &QueryParams) -> AggregatorResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| e.without_url())?;
        let status = response.status();
        let body = response.text().map_err(|e| e.without_url())?;

        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Like `get_json`, but failures are logged and reported as `None`
    pub fn get_json_or_log<T: DeserializeOwned>(
        &self,
        provider: ProviderKind,
        source_id: i64,
        url: Url,
        query: &QueryParams,
    ) -> Option<T> {
        // Only parameter names: values carry the API key
        debug!(
            provider = %provider,
            url = %url,
            params = ?query.keys().collect::<Vec<_>>(),
            "provider API request"
        );

        match self.get_json(url, query) {
            Ok(body) => Some(body),
            Err(AggregatorError::HttpStatus { status, body }) => {
                error!(provider = %provider, source_id, status, response = %body, "provider API error");
                None
            }
            Err(e) => {
                error!(provider = %provider, source_id, error = %e, "provider API exception");
                None
            }
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
