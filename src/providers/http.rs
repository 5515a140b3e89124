use crate::core::config::ApiConfig;
use crate::core::{DashboardSource, ExchangeRates, FetchError, FinancialSummary, Resource};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Reads the dashboard resources from a JSON HTTP API.
pub struct HttpDashboardSource {
    base_url: String,
    rates_path: String,
    summary_path: String,
    client: reqwest::Client,
}

impl HttpDashboardSource {
    pub fn new(api: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxdash/1.0")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(HttpDashboardSource {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            rates_path: api.rates_path.clone(),
            summary_path: api.summary_path.clone(),
            client,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[instrument(name = "DashboardFetch", skip(self), fields(resource = %resource))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
    ) -> Result<T, FetchError> {
        let url = self.url_for(path);
        debug!("Requesting {} from {}", resource, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network { resource, source })?;

        debug!(status = %response.status(), "Received response");

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol { resource, status });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Network { resource, source })?;

        serde_json::from_str(&text).map_err(|source| {
            error!(
                error = ?source,
                response = %text,
                "Failed to parse {} response", resource
            );
            FetchError::Decode { resource, source }
        })
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch_rates(&self) -> Result<ExchangeRates, FetchError> {
        self.get_json(Resource::ExchangeRates, &self.rates_path).await
    }

    async fn fetch_summary(&self) -> Result<FinancialSummary, FetchError> {
        self.get_json(Resource::Summary, &self.summary_path).await
    }
}
