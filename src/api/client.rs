use reqwest::Client;
use tracing::debug;

use crate::models::Restaurant;

use super::FetchError;

/// HTTP client for the restaurant data endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given endpoint base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full restaurant dataset. One request, no retries.
    pub async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, FetchError> {
        let url = format!("{}/restaurants", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        debug!(url = %url, bytes = text.len(), "Restaurants response received");

        let restaurants: Vec<Restaurant> = serde_json::from_str(&text)?;
        Ok(restaurants)
    }
}
