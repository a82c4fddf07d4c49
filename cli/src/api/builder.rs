//! Builder pattern for configuring the IBGE pipeline

use crate::api::pipeline::DashboardPipeline;
use crate::error::FetchError;
use crate::services::{Endpoints, IbgeClient, DEFAULT_TIMEOUT};
use std::time::Duration;

/// Builder for a [`DashboardPipeline`] backed by the live IBGE API
///
/// # Example
/// ```rust
/// use ibge_phillips::api::PipelineBuilder;
/// use std::time::Duration;
///
/// let pipeline = PipelineBuilder::new()
///     .with_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    endpoints: Endpoints,
    timeout: Duration,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_inflation_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.inflation = url.into();
        self
    }

    pub fn with_unemployment_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.unemployment = url.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn build(self) -> Result<DashboardPipeline<IbgeClient>, FetchError> {
        let client = IbgeClient::new(self.timeout)?;
        Ok(DashboardPipeline::new(client, self.endpoints))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_endpoints() {
        let pipeline = PipelineBuilder::new()
            .with_inflation_url("http://localhost/ipca")
            .with_unemployment_url("http://localhost/pnad")
            .build()
            .unwrap();
        assert_eq!(pipeline.endpoints().inflation, "http://localhost/ipca");
        assert_eq!(pipeline.endpoints().unemployment, "http://localhost/pnad");
    }

    #[test]
    fn test_builder_defaults() {
        let pipeline = PipelineBuilder::default().build().unwrap();
        assert_eq!(pipeline.endpoints(), &Endpoints::default());
    }
}
