//! Change detection and notification dispatch.
//!
//! Compares freshly computed results against the stored snapshot and sends
//! one message per product whose availability flipped.

use crate::models::{AvailabilityResult, Snapshot};
use crate::services::Messenger;
use crate::utils::markdown;

/// An availability flip for one tracked product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The fresh result
    pub current: AvailabilityResult,
    /// `found` as recorded in the snapshot
    pub previously_found: bool,
}

impl Transition {
    /// Human status line for the notification.
    pub fn status_line(&self) -> &'static str {
        if self.current.found {
            "The product is available!"
        } else {
            "The product is out of stock..."
        }
    }

    /// Label of the status recorded in the snapshot.
    pub fn previous_label(&self) -> &'static str {
        if self.previously_found {
            "available"
        } else {
            "out of stock"
        }
    }

    /// Render the notification text (Telegram Markdown).
    pub fn message(&self) -> String {
        let mut message = format!(
            "*Product*: {}\n*Venue*: {}\n*Status*: {}",
            markdown::escape(&self.current.name),
            markdown::escape(&self.current.venue),
            self.status_line()
        );
        if !self.current.image.is_empty() {
            message.push_str(&format!(
                "\n[image]({})",
                markdown::link_target(&self.current.image)
            ));
        }
        message
    }
}

/// Counts from one notification batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub sent: usize,
    pub failed: usize,
}

/// Find results whose `found` differs from the snapshot entry with the same name.
///
/// Names missing from the snapshot are first sightings and produce nothing.
pub fn detect_transitions(results: &[AvailabilityResult], snapshot: &Snapshot) -> Vec<Transition> {
    results
        .iter()
        .filter_map(|current| {
            let previous = snapshot.get(&current.name)?;
            log::debug!(
                "'{}': old status {}, new status {}",
                current.name,
                previous.found,
                current.found
            );
            (previous.found != current.found).then(|| Transition {
                current: current.clone(),
                previously_found: previous.found,
            })
        })
        .collect()
}

/// Send one message per transition. A failed send is logged and does not stop the batch.
pub async fn notify_transitions(
    messenger: &dyn Messenger,
    transitions: &[Transition],
) -> NotifyOutcome {
    let mut outcome = NotifyOutcome::default();

    for transition in transitions {
        log::info!(
            "Status changed for '{}' at {}: {} -> {}",
            transition.current.name,
            transition.current.venue,
            transition.previous_label(),
            transition.current.status_label()
        );

        match messenger.send_message(&transition.message()).await {
            Ok(()) => outcome.sent += 1,
            Err(e) => {
                outcome.failed += 1;
                log::warn!(
                    "Failed to send notification for '{}': {}",
                    transition.current.name,
                    e
                );
            }
        }
    }

    outcome
}

/// Detect transitions and notify them.
pub async fn diff_and_notify(
    messenger: &dyn Messenger,
    results: &[AvailabilityResult],
    snapshot: &Snapshot,
) -> NotifyOutcome {
    let transitions = detect_transitions(results, snapshot);
    notify_transitions(messenger, &transitions).await
}
