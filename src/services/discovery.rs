// src/services/discovery.rs

//! Venue discovery service.
//!
//! Lists the retail stores the delivery platform shows for a city and narrows
//! them down by name, so venue config entries don't have to be assembled by hand.

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{City, DiscoveryConfig, RetailPage, StoreItem};
use crate::utils::http::fetch_json;
use crate::utils::with_query;

/// Index of the section holding the store list on the retail page.
const STORE_SECTION: usize = 1;

/// Client for the retail landing page.
pub struct DiscoveryClient {
    client: Client,
    retail_page_url: String,
}

impl DiscoveryClient {
    pub fn new(client: Client, config: &DiscoveryConfig) -> Self {
        Self {
            client,
            retail_page_url: config.retail_page_url.clone(),
        }
    }

    /// Fetch every store listed for a city.
    pub async fn stores_in_city(&self, city: &City) -> Result<Vec<StoreItem>> {
        let url = with_query(
            &self.retail_page_url,
            &[("lat", city.lat.to_string()), ("lon", city.lon.to_string())],
        )?;
        log::debug!("Fetching retail page for {}: {}", city.name, url);

        let page: RetailPage = fetch_json(&self.client, &url).await?;
        let stores = store_section(page, &city.name)?;
        log::info!("Found {} stores in {}", stores.len(), city.name);
        Ok(stores)
    }
}

/// Pick the store list out of a retail page.
pub fn store_section(page: RetailPage, city_name: &str) -> Result<Vec<StoreItem>> {
    page.sections
        .into_iter()
        .nth(STORE_SECTION)
        .map(|section| section.items)
        .ok_or_else(|| AppError::discovery(format!("no stores for city {city_name}")))
}

/// Keep stores whose title contains `name`, case-insensitively.
pub fn filter_stores(stores: Vec<StoreItem>, name: &str) -> Result<Vec<StoreItem>> {
    let needle = name.to_lowercase();
    let matched: Vec<StoreItem> = stores
        .into_iter()
        .filter(|store| store.title.to_lowercase().contains(&needle))
        .collect();

    if matched.is_empty() {
        return Err(AppError::discovery(format!(
            "no stores found with the name: {name}"
        )));
    }
    Ok(matched)
}
