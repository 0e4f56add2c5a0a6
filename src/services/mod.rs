//! Service layer for the availability watcher.
//!
//! This module contains the clients for external APIs:
//! - Retailer catalogs (`CatalogClient`)
//! - Telegram bot messaging (`TelegramClient`)
//! - Venue discovery (`DiscoveryClient`)

mod catalog;
#[cfg(feature = "discover")]
mod discovery;
mod telegram;

pub use catalog::{CatalogClient, CatalogSource};
#[cfg(feature = "discover")]
pub use discovery::{DiscoveryClient, filter_stores, store_section};
pub use telegram::{Messenger, TelegramClient, parse_updates};
