//! Availability results and the name-keyed snapshot built from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Availability of one tracked product at one venue, as of `time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityResult {
    /// Venue display name
    pub venue: String,

    /// Tracked product name (the configured search term, not the catalog title)
    pub name: String,

    /// Whether a purchasable match was found
    #[serde(alias = "founded")]
    pub found: bool,

    /// RFC 3339 timestamp of the check
    pub time: String,

    /// First image URL of the match, empty when not found
    #[serde(default)]
    pub image: String,
}

impl AvailabilityResult {
    /// Human status word used in digests.
    pub fn status_label(&self) -> &'static str {
        if self.found { "available" } else { "out of stock" }
    }
}

/// Name-keyed lookup over the last persisted results.
///
/// Keyed by product name only: two venues tracking the same name collide and
/// the later entry in the persisted list wins.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<String, AvailabilityResult>,
}

impl Snapshot {
    /// Build the lookup from a persisted list (last write wins).
    pub fn from_results(results: impl IntoIterator<Item = AvailabilityResult>) -> Self {
        let mut entries = HashMap::new();
        for result in results {
            entries.insert(result.name.clone(), result);
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&AvailabilityResult> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(venue: &str, name: &str, found: bool) -> AvailabilityResult {
        AvailabilityResult {
            venue: venue.to_string(),
            name: name.to_string(),
            found,
            time: "2026-01-01T00:00:00+00:00".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_snapshot_last_write_wins() {
        let snapshot = Snapshot::from_results(vec![
            result("A", "cola", true),
            result("B", "cola", false),
            result("A", "milk", true),
        ]);

        assert_eq!(snapshot.len(), 2);
        let cola = snapshot.get("cola").unwrap();
        assert_eq!(cola.venue, "B");
        assert!(!cola.found);
    }

    #[test]
    fn test_reads_legacy_founded_field() {
        let json = r#"{"venue": "V", "name": "cola", "founded": true, "time": "t", "image": "x"}"#;
        let parsed: AvailabilityResult = serde_json::from_str(json).unwrap();
        assert!(parsed.found);

        let written = serde_json::to_value(&parsed).unwrap();
        assert_eq!(written["found"], true);
        assert!(written.get("founded").is_none());
    }

    #[test]
    fn test_status_label() {
        assert_eq!(result("V", "cola", true).status_label(), "available");
        assert_eq!(result("V", "cola", false).status_label(), "out of stock");
    }
}
