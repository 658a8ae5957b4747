//! Remote catalog access.

use crate::config::CatalogConfig;
use crate::error::{CoreError, CoreResult};
use crate::error_handling::log_warning;
use crate::model::Product;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Source of the product list. Fails with [`CoreError::Fetch`] on transport
/// errors and [`CoreError::Decode`] on a malformed body.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> CoreResult<Vec<Product>>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

/// Accepted response bodies: a bare array, or a page object with `items`.
/// Entries are decoded one by one afterwards.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    List(Vec<serde_json::Value>),
    Page { items: Vec<serde_json::Value> },
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> CoreResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(cfg: &CatalogConfig) -> CoreResult<Self> {
        let endpoint = cfg
            .endpoint
            .clone()
            .ok_or_else(|| CoreError::Config("catalog.endpoint is required".to_string()))?;
        Self::new(endpoint, cfg.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_catalog(&self) -> CoreResult<Vec<Product>> {
        tracing::debug!(endpoint = %self.endpoint, "fetching catalog");
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        parse_catalog(&body)
    }
}

/// Fails only when the body as a whole is not a catalog. Entries that are
/// not valid products are logged and left out.
pub fn parse_catalog(body: &[u8]) -> CoreResult<Vec<Product>> {
    let entries = match serde_json::from_slice::<CatalogPayload>(body)? {
        CatalogPayload::List(items) | CatalogPayload::Page { items } => items,
    };

    let mut products = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Product>(entry) {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(position, "skipping malformed catalog entry");
                log_warning("catalog entry", &e);
            }
        }
    }
    Ok(products)
}
