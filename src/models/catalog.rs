//! Retailer catalog payload.

use serde::{Deserialize, Serialize};

/// A venue's catalog as returned by the retailer API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,

    /// Units left to buy; absent means the retailer does not report stock
    #[serde(default)]
    pub purchasable_balance: Option<i64>,

    #[serde(default)]
    pub images: Vec<ItemImage>,
}

/// Image reference attached to a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemImage {
    pub url: String,
}

impl CatalogItem {
    /// Whether the item can currently be bought.
    pub fn is_purchasable(&self) -> bool {
        self.purchasable_balance != Some(0)
    }

    /// URL of the first image, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(|img| img.url.as_str())
    }
}
