// src/pipeline/discover.rs

//! Venue discovery pipeline.

use crate::error::{AppError, Result};
use crate::models::{DiscoveryConfig, StoreItem, VenueConfig};
use crate::services::{DiscoveryClient, filter_stores};

/// Find stores in `city` whose title contains `name` and turn them into venue entries.
///
/// `track` seeds the product names of every generated entry.
pub async fn run_discover(
    config: &DiscoveryConfig,
    client: &DiscoveryClient,
    city: &str,
    name: &str,
    track: &[String],
) -> Result<Vec<VenueConfig>> {
    let city = config.city(city).ok_or_else(|| {
        let known: Vec<_> = config.cities.iter().map(|c| c.id.as_str()).collect();
        AppError::validation(format!(
            "Unknown city '{}'. Known cities: {}",
            city,
            known.join(", ")
        ))
    })?;

    let stores = client.stores_in_city(city).await?;
    let matched = filter_stores(stores, name)?;
    log::info!("{} stores in {} match '{}'", matched.len(), city.name, name);

    Ok(to_venue_configs(config, &matched, track))
}

/// Build venue entries pointing at each store's catalog endpoint.
pub fn to_venue_configs(
    config: &DiscoveryConfig,
    stores: &[StoreItem],
    track: &[String],
) -> Vec<VenueConfig> {
    stores
        .iter()
        .map(|store| VenueConfig {
            endpoint: config.assortment_url(&store.venue.slug),
            names: track.to_vec(),
            venue: store.title.clone(),
        })
        .collect()
}
