//! Tracked venue configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A venue whose catalog is polled for a list of product names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VenueConfig {
    /// Catalog endpoint URL
    pub endpoint: String,

    /// Product names to track (matched as case-insensitive substrings)
    pub names: Vec<String>,

    /// Venue display name
    pub venue: String,
}

impl VenueConfig {
    /// Validate a single venue entry.
    pub fn validate(&self) -> Result<()> {
        if self.venue.trim().is_empty() {
            return Err(AppError::validation("venue name is empty"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(AppError::validation(format!(
                "venue '{}' has an empty endpoint",
                self.venue
            )));
        }
        url::Url::parse(&self.endpoint).map_err(|e| {
            AppError::validation(format!(
                "venue '{}' has an invalid endpoint '{}': {}",
                self.venue, self.endpoint, e
            ))
        })?;
        if self.names.is_empty() {
            return Err(AppError::validation(format!(
                "venue '{}' tracks no product names",
                self.venue
            )));
        }
        if self.names.iter().any(|n| n.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "venue '{}' has an empty product name",
                self.venue
            )));
        }
        Ok(())
    }
}
