use crate::{
    error::FetchError,
    services::SeriesSource,
    utils::{Logger, Timer},
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// IPCA monthly % change (aggregate 7060, variable 63) for every metropolitan area (N7)
pub const INFLATION_URL: &str = "https://servicodados.ibge.gov.br/api/v3/agregados/7060/periodos/202001-202412/variaveis/63?localidades=N7[all]";

/// PNAD Contínua unemployment rate (aggregate 4099, variable 4099) for every macro-region (N2)
pub const UNEMPLOYMENT_URL: &str = "https://servicodados.ibge.gov.br/api/v3/agregados/4099/periodos/202001-202404/variaveis/4099?localidades=N2[all]";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// The two endpoints the pipeline reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub inflation: String,
    pub unemployment: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            inflation: INFLATION_URL.to_string(),
            unemployment: UNEMPLOYMENT_URL.to_string(),
        }
    }
}

/// HTTP client for the IBGE aggregates API.
///
/// One attempt per request: no retries, no backoff.
pub struct IbgeClient {
    client: reqwest::Client,
    logger: Logger,
}

impl IbgeClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Http {
                url: String::new(),
                source,
            })?;

        Ok(Self {
            client,
            logger: Logger::new("IBGE_CLIENT"),
        })
    }
}

#[async_trait]
impl SeriesSource for IbgeClient {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.logger.info(&format!("Requesting {}", url));
        let timer = Timer::start("IBGE request");

        let http_error = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let error = FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            };
            self.logger.warn_with_error("Request rejected", &error);
            return Err(error);
        }

        let body = response.bytes().await.map_err(http_error)?;
        let json = serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;

        timer.log_elapsed("IBGE_CLIENT");
        self.logger.debug(&format!("Received {} bytes from {}", body.len(), url));
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ibge_client_creation() {
        let client = IbgeClient::new(DEFAULT_TIMEOUT);
        assert!(client.is_ok());
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert!(endpoints.inflation.contains("/agregados/7060/"));
        assert!(endpoints.inflation.ends_with("localidades=N7[all]"));
        assert!(endpoints.unemployment.contains("/agregados/4099/"));
        assert!(endpoints.unemployment.ends_with("localidades=N2[all]"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let client = IbgeClient::new(Duration::from_millis(500)).unwrap();
        let result = client.fetch_json("http://127.0.0.1:9/agregados").await;
        assert!(matches!(result, Err(FetchError::Http { .. })));
    }
}
