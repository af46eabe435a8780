//! Product catalog client.
//!
//! Fetches product JSON from the catalog CDN with `reqwest` and caches
//! validated snapshots using `moka` (5-minute TTL). A load failure is
//! terminal for the page view and is not retried here.

mod conversions;
mod types;

pub use conversions::{RawPrice, RawProduct, RawVariant};
pub use types::{CatalogSnapshot, GalleryImages, ProductOption, Variant};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::debug;
use vitrine_core::ProductId;

/// Errors that can occur when loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but violates a catalog invariant.
    #[error("invalid catalog data: {0}")]
    Invalid(String),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product catalog CDN.
///
/// Snapshots are validated on load and cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Arc<CatalogSnapshot>>,
}

impl CatalogClient {
    /// Create a new catalog client for the given CDN base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
                cache,
            }),
        }
    }

    /// URL of the product document for `id`.
    #[must_use]
    pub fn product_url(&self, id: ProductId) -> String {
        format!(
            "{}/teste-prod-{id}.json",
            self.inner.base_url.trim_end_matches('/')
        )
    }

    /// Fetch the catalog snapshot for a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the request fails, the document cannot be
    /// parsed, or the data violates a snapshot invariant.
    pub async fn product(&self, id: ProductId) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        if let Some(hit) = self.inner.cache.get(&id).await {
            debug!(product_id = %id, "catalog cache hit");
            return Ok(hit);
        }

        let url = self.product_url(id);
        debug!(product_id = %id, %url, "fetching catalog snapshot");

        let response = self
            .inner
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let raw: RawProduct = serde_json::from_str(&body)?;
        let snapshot = Arc::new(CatalogSnapshot::try_from(raw)?);

        self.inner.cache.insert(id, Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }
}
