// src/pipeline/context.rs

//! Shared dependencies handed to every loop.

use std::sync::Arc;

use crate::config::{Credentials, StoragePaths};
use crate::error::Result;
use crate::models::{Settings, VenueConfig};
use crate::services::{CatalogClient, CatalogSource, Messenger, TelegramClient};
use crate::storage::{LocalStorage, SnapshotStore};
use crate::utils::http;

/// Everything a cycle or command poll needs. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    pub settings: Arc<Settings>,
    pub venues: Arc<Vec<VenueConfig>>,
    pub catalog: Arc<dyn CatalogSource>,
    pub messenger: Arc<dyn Messenger>,
    pub store: Arc<dyn SnapshotStore>,
}

impl Context {
    /// Wire up the HTTP-backed clients and the file snapshot store.
    pub fn build(
        settings: Settings,
        venues: Vec<VenueConfig>,
        paths: &StoragePaths,
        credentials: Credentials,
    ) -> Result<Self> {
        let client = http::create_async_client(&settings.http)?;
        let catalog = CatalogClient::new(client.clone());
        let messenger = TelegramClient::new(client, &settings.telegram, credentials);
        let store = LocalStorage::new(&paths.snapshot);

        Ok(Self {
            settings: Arc::new(settings),
            venues: Arc::new(venues),
            catalog: Arc::new(catalog),
            messenger: Arc::new(messenger),
            store: Arc::new(store),
        })
    }
}
