// src/services/catalog.rs

//! Retailer catalog client.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::Catalog;
use crate::utils::http::fetch_json;

/// Source of venue catalogs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the catalog served at `endpoint`.
    async fn fetch_catalog(&self, endpoint: &str) -> Result<Catalog>;
}

/// Catalog source backed by the retailer HTTP API.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self, endpoint: &str) -> Result<Catalog> {
        let catalog: Catalog = fetch_json(&self.client, endpoint)
            .await
            .map_err(|e| AppError::catalog(endpoint, e))?;
        log::debug!("Fetched {} catalog items from {}", catalog.items.len(), endpoint);
        Ok(catalog)
    }
}
