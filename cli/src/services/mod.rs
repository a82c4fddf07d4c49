pub mod export;
pub mod ibge_client;

pub use export::*;
pub use ibge_client::*;

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can return the raw JSON document behind an endpoint URL
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}
