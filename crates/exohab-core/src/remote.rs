//! HTTP client for a hosted prediction service.
//!
//! `POST {base}/predict` takes the planet parameters as JSON and answers with
//! a prediction. `GET {base}/exoplanets` takes the catalog filters as query
//! parameters and answers with a catalog page. Any transport failure,
//! non-success status, or undecodable body is reported as unavailable; the
//! caller decides whether to retry.

use reqwest::blocking::Client;

use exohab_logic::catalog::{CatalogPage, CatalogQuery};
use exohab_logic::params::PlanetParameters;
use exohab_logic::prediction::HabitabilityPrediction;

use crate::error::{FetchError, PredictionError};
use crate::provider::{check_finite, PredictionProvider};

/// Thin blocking client over the service's two endpoints.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict(
        &self,
        params: &PlanetParameters,
    ) -> Result<HabitabilityPrediction, PredictionError> {
        let url = format!("{}/predict", self.base_url);
        let unavailable = |reason: String| {
            log::warn!("Prediction API error: {}", reason);
            PredictionError::Unavailable { reason }
        };

        let resp = self
            .http
            .post(&url)
            .json(params)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP error! status: {}", status)));
        }
        resp.json::<HabitabilityPrediction>()
            .map_err(|e| unavailable(format!("bad response body: {}", e)))
    }

    pub fn fetch_catalog(&self, query: &CatalogQuery) -> Result<CatalogPage, FetchError> {
        let url = format!("{}/exoplanets", self.base_url);
        let unavailable = |reason: String| {
            log::warn!("Database API error: {}", reason);
            FetchError::Unavailable { reason }
        };

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP error! status: {}", status)));
        }
        resp.json::<CatalogPage>()
            .map_err(|e| unavailable(format!("bad response body: {}", e)))
    }
}

/// Prediction provider backed by [`RemoteClient`].
#[derive(Debug, Clone)]
pub struct RemoteServiceProvider {
    client: RemoteClient,
}

impl RemoteServiceProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RemoteClient::new(base_url),
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }
}

impl PredictionProvider for RemoteServiceProvider {
    fn predict(
        &mut self,
        params: &PlanetParameters,
    ) -> Result<HabitabilityPrediction, PredictionError> {
        check_finite(params)?;
        self.client.predict(params)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
