//! Retail page payload used for venue discovery.

use serde::{Deserialize, Serialize};

/// Retail landing page for a location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetailPage {
    #[serde(default)]
    pub sections: Vec<RetailSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetailSection {
    #[serde(default)]
    pub items: Vec<StoreItem>,
}

/// A store tile on the retail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreItem {
    #[serde(default)]
    pub image: Option<StoreImage>,
    pub title: String,
    #[serde(default)]
    pub track_id: String,
    pub venue: StoreVenue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreVenue {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
}
