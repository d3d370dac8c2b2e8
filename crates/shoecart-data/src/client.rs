//! HTTP catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shoecart_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::{CatalogApi, FetchError};

/// Fetch policy for outbound lookups.
///
/// The cart never retries; the only knob is an optional per-request
/// timeout. Without one, a hung lookup hangs only the operation waiting on
/// it.
#[derive(Debug, Clone, Default)]
pub struct FetchPolicy {
    /// Total time allowed per request.
    pub timeout: Option<Duration>,
}

impl FetchPolicy {
    /// Create a policy with the given timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Catalog backed by the storefront REST API.
///
/// Endpoints, relative to the base URL:
/// - `GET /products` - product listing
/// - `GET /products/{id}` - product details
/// - `GET /stock/{id}` - stock record
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is not http(s) or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>, policy: FetchPolicy) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = policy.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Self::with_client(base_url, client)
    }

    /// Create a client for the API at `base_url` reusing an existing
    /// `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource, mapping 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, FetchError> {
        let url = self.url(path);
        tracing::debug!(%url, "catalog request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        self.get_optional(&format!("/products/{}", id)).await
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Option<StockRecord>, FetchError> {
        self.get_optional(&format!("/stock/{}", id)).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        Ok(self.get_optional("/products").await?.unwrap_or_default())
    }
}
