// src/models/mod.rs

//! Domain models for the availability watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod availability;
mod catalog;
mod config;
mod store;
mod update;
mod venue;

// Re-export all public types
pub use availability::{AvailabilityResult, Snapshot};
pub use catalog::{Catalog, CatalogItem, ItemImage};
pub use config::{
    City, DiscoveryConfig, FetchConfig, HttpConfig, PathsConfig, ScheduleConfig, ServerConfig,
    Settings, TelegramConfig,
};
pub use store::{RetailPage, RetailSection, StoreImage, StoreItem, StoreVenue};
pub use update::{Chat, Message, Sender, Update, UpdateResponse};
pub use venue::VenueConfig;
