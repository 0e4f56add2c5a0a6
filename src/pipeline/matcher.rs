// src/pipeline/matcher.rs

//! Availability matching of tracked product names against a catalog.

use chrono::{Local, SecondsFormat};

use crate::models::{AvailabilityResult, Catalog, CatalogItem, VenueConfig};

/// Compute one result per tracked name of `venue`, stamped with the current time.
pub fn match_availability(venue: &VenueConfig, catalog: &Catalog) -> Vec<AvailabilityResult> {
    let time = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    match_availability_at(venue, catalog, &time)
}

/// Compute one result per tracked name of `venue`, in configured order.
pub fn match_availability_at(
    venue: &VenueConfig,
    catalog: &Catalog,
    time: &str,
) -> Vec<AvailabilityResult> {
    venue
        .names
        .iter()
        .map(|name| {
            let matched = find_match(&catalog.items, name);
            if let Some(item) = matched {
                log::debug!(
                    "[{}] '{}' matched '{}' (balance: {:?})",
                    venue.venue,
                    name,
                    item.name,
                    item.purchasable_balance
                );
            } else {
                log::debug!("[{}] '{}' not found", venue.venue, name);
            }

            AvailabilityResult {
                venue: venue.venue.clone(),
                name: name.clone(),
                found: matched.is_some(),
                time: time.to_string(),
                image: matched
                    .and_then(CatalogItem::first_image)
                    .unwrap_or_default()
                    .to_string(),
            }
        })
        .collect()
}

/// First item whose name contains `name` (case-insensitive) and that can be bought.
///
/// Sold-out items are skipped, so a later purchasable item with a matching
/// name still counts.
pub fn find_match<'a>(items: &'a [CatalogItem], name: &str) -> Option<&'a CatalogItem> {
    let needle = name.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .find(|item| item.is_purchasable())
}
