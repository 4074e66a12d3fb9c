use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::errors::FetchError;
use super::retry::RetryPolicy;
use crate::domain::models::{Breed, CatalogConfig};
use crate::domain::ports::{BreedCatalog, CatalogError};

/// Process-lifetime breed index, filled by the first successful fetch.
///
/// Cloning shares the same underlying cell. A failed fetch leaves the cell
/// empty so the next lookup tries again.
#[derive(Debug, Clone, Default)]
pub struct BreedCache {
    cell: Arc<OnceCell<HashMap<String, Breed>>>,
}

impl BreedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }

    async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<&HashMap<String, Breed>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<HashMap<String, Breed>, FetchError>>,
    {
        self.cell.get_or_try_init(fetch).await
    }
}

/// Breed catalog backed by a JSON endpoint returning every breed at once.
pub struct HttpBreedCatalog {
    http_client: ReqwestClient,
    url: String,
    retry_policy: RetryPolicy,
    cache: BreedCache,
}

impl HttpBreedCatalog {
    /// Build a client from config, sharing the given cache.
    pub fn new(config: &CatalogConfig, cache: BreedCache) -> Result<Self, CatalogError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
            retry_policy: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            ),
            cache,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<Breed>, FetchError> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn fetch_all(&self) -> Result<HashMap<String, Breed>, FetchError> {
        let breeds = self.retry_policy.execute(|| self.fetch_once()).await?;
        info!(count = breeds.len(), "Breed catalog loaded");
        Ok(breeds.into_iter().map(|b| (b.id.clone(), b)).collect())
    }
}

#[async_trait]
impl BreedCatalog for HttpBreedCatalog {
    #[instrument(skip(self))]
    async fn get_breed_by_id(&self, id: &str) -> Result<Breed, CatalogError> {
        let breeds = self
            .cache
            .get_or_fetch(|| self.fetch_all())
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        match breeds.get(id) {
            Some(breed) => Ok(breed.clone()),
            None => {
                debug!(breed = id, "Breed not in catalog");
                Err(CatalogError::BreedNotFound(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_starts_empty_and_is_shared() {
        let cache = BreedCache::new();
        let shared = cache.clone();
        assert!(!cache.is_populated());

        let filled = cache
            .get_or_fetch(|| async {
                Ok(HashMap::from([("abys".to_string(), Breed::new("abys", "Abyssinian"))]))
            })
            .await
            .unwrap();
        assert_eq!(filled.len(), 1);
        assert!(shared.is_populated());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let cache = BreedCache::new();

        let result = cache
            .get_or_fetch(|| async { Err(FetchError::Decode("truncated".to_string())) })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_populated());
    }
}
