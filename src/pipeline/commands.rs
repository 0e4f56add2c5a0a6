// src/pipeline/commands.rs

//! Inbound command polling: replies to `status` requests with a digest of the
//! stored snapshot.

use tokio::sync::watch;

use crate::error::Result;
use crate::models::{AvailabilityResult, Update};
use crate::pipeline::Context;
use crate::pipeline::sleep_or_shutdown;
use crate::utils::markdown;

/// Keyword that triggers a status digest.
const STATUS_KEYWORD: &str = "status";

/// Whether a message asks for the status digest.
pub fn is_status_request(text: &str) -> bool {
    text.to_lowercase().contains(STATUS_KEYWORD)
}

/// Longest text Telegram accepts in one message, in characters.
const MESSAGE_LIMIT: usize = 4096;

/// Whether a message is longer than Telegram accepts.
pub fn exceeds_message_limit(text: &str) -> bool {
    text.chars().count() > MESSAGE_LIMIT
}

/// One `"{venue} | {name} is {available|out of stock}"` line per stored result.
///
/// Venue and product names are escaped for Markdown.
pub fn format_digest(results: &[AvailabilityResult]) -> String {
    if results.is_empty() {
        return "No availability results recorded yet.".to_string();
    }
    results
        .iter()
        .map(|r| {
            format!(
                "{} | {} is {}",
                markdown::escape(&r.venue),
                markdown::escape(&r.name),
                r.status_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Poll one batch of updates starting at `offset` and answer status requests.
///
/// Returns the offset for the next poll: one past the last update seen, or
/// `offset` unchanged when the batch was empty.
pub async fn poll_commands(ctx: &Context, offset: i64) -> Result<i64> {
    let updates = ctx.messenger.get_updates(offset).await?;

    let mut next_offset = offset;
    for update in &updates {
        handle_update(ctx, update).await;
        next_offset = update.update_id + 1;
    }
    Ok(next_offset)
}

async fn handle_update(ctx: &Context, update: &Update) {
    let Some(text) = update.text() else {
        log::debug!("Ignoring update {} without text", update.update_id);
        return;
    };
    log::info!("New message from {}: {}", update.sender(), text);

    if !is_status_request(text) {
        return;
    }

    let results = match ctx.store.load_results().await {
        Ok(results) => results,
        Err(e) => {
            log::error!("Failed to load snapshot for status digest: {}", e);
            return;
        }
    };

    let digest = format_digest(&results);
    if exceeds_message_limit(&digest) {
        log::warn!(
            "Status digest for {} results is {} characters, over the {} limit",
            results.len(),
            digest.chars().count(),
            MESSAGE_LIMIT
        );
    }

    if let Err(e) = ctx.messenger.send_message(&digest).await {
        log::warn!(
            "Failed to send status digest ({} characters): {}",
            digest.chars().count(),
            e
        );
    }
}

/// Poll for commands until shutdown is requested.
///
/// The offset lives only in this loop; a failed poll keeps it unchanged so
/// the same updates are requested again on the next tick.
pub async fn run_command_loop(ctx: Context, mut shutdown: watch::Receiver<bool>) {
    let interval = ctx.settings.schedule.command_interval();
    log::info!("Command loop started: polling every {}s", interval.as_secs());

    let mut offset: i64 = 0;
    loop {
        if *shutdown.borrow() {
            break;
        }

        match poll_commands(&ctx, offset).await {
            Ok(next) => offset = next,
            Err(e) => log::warn!("Error getting updates: {}", e),
        }

        if sleep_or_shutdown(&mut shutdown, interval).await {
            break;
        }
    }

    log::info!("Command loop stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::Settings;
    use crate::pipeline::testing::{MockCatalog, MockMessenger, context, text_update};
    use crate::storage::{LocalStorage, SnapshotStore};

    fn stored(venue: &str, name: &str, found: bool) -> AvailabilityResult {
        AvailabilityResult {
            venue: venue.to_string(),
            name: name.to_string(),
            found,
            time: "2026-01-01T00:00:00+00:00".to_string(),
            image: String::new(),
        }
    }

    async fn setup(results: &[AvailabilityResult]) -> (TempDir, Arc<MockMessenger>, Context) {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(LocalStorage::new(tmp.path().join("store.json")));
        store.write_results(results).await.unwrap();
        let messenger = Arc::new(MockMessenger::default());
        let ctx = context(vec![], MockCatalog::default(), messenger.clone(), store);
        (tmp, messenger, ctx)
    }

    #[test]
    fn test_is_status_request() {
        assert!(is_status_request("what's the status?"));
        assert!(is_status_request("STATUS"));
        assert!(is_status_request("/status"));
        assert!(!is_status_request("hello"));
        assert!(!is_status_request("stat"));
    }

    #[test]
    fn test_format_digest() {
        let digest = format_digest(&[stored("V", "cola", true), stored("W", "milk", false)]);
        assert_eq!(digest, "V | cola is available\nW | milk is out of stock");
    }

    #[test]
    fn test_format_digest_escapes_names() {
        let digest = format_digest(&[stored("Spar_Vake", "oat_milk", true)]);
        assert_eq!(digest, "Spar\\_Vake | oat\\_milk is available");
    }

    #[test]
    fn test_exceeds_message_limit() {
        assert!(!exceeds_message_limit(&"a".repeat(4096)));
        assert!(exceeds_message_limit(&"a".repeat(4097)));
        // Counted in characters, not bytes.
        assert!(!exceeds_message_limit(&"ყ".repeat(4096)));
    }

    #[tokio::test]
    async fn test_oversized_digest_is_still_one_message() {
        let results: Vec<_> = (0..300)
            .map(|i| stored("Gastronome Vake", &format!("product number {i}"), i % 2 == 0))
            .collect();
        let (_tmp, messenger, ctx) = setup(&results).await;
        messenger.push_updates(Ok(vec![text_update(1, "status")]));

        assert_eq!(poll_commands(&ctx, 0).await.unwrap(), 2);
        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert!(exceeds_message_limit(&sent[0]));
        assert_eq!(sent[0].lines().count(), 300);
    }

    #[test]
    fn test_format_digest_empty() {
        assert!(!format_digest(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_status_message_triggers_digest() {
        let (_tmp, messenger, ctx) =
            setup(&[stored("V", "cola", true), stored("V", "milk", false)]).await;
        messenger.push_updates(Ok(vec![text_update(100, "what's the status?")]));

        let next = poll_commands(&ctx, 0).await.unwrap();
        assert_eq!(next, 101);

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        let lines: Vec<_> = sent[0].lines().collect();
        assert_eq!(lines, vec!["V | cola is available", "V | milk is out of stock"]);
    }

    #[tokio::test]
    async fn test_other_messages_advance_offset_silently() {
        let (_tmp, messenger, ctx) = setup(&[stored("V", "cola", true)]).await;
        messenger.push_updates(Ok(vec![text_update(7, "hi"), text_update(8, "thanks")]));

        let next = poll_commands(&ctx, 3).await.unwrap();
        assert_eq!(next, 9);
        assert!(messenger.sent().is_empty());
        assert_eq!(messenger.offsets(), vec![3]);
    }

    #[tokio::test]
    async fn test_empty_batch_keeps_offset() {
        let (_tmp, _messenger, ctx) = setup(&[]).await;
        assert_eq!(poll_commands(&ctx, 12).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_failed_poll_is_error() {
        let (_tmp, messenger, ctx) = setup(&[]).await;
        messenger.push_updates(Err(AppError::messaging("unexpected status code 502")));
        assert!(poll_commands(&ctx, 5).await.is_err());
    }

    #[tokio::test]
    async fn test_digest_send_failure_still_advances() {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(LocalStorage::new(tmp.path().join("store.json")));
        store.write_results(&[stored("V", "cola", true)]).await.unwrap();
        let messenger = Arc::new(MockMessenger::failing_on(&["cola"]));
        let ctx = context(vec![], MockCatalog::default(), messenger.clone(), store);

        messenger.push_updates(Ok(vec![text_update(1, "status"), text_update(2, "status")]));
        assert_eq!(poll_commands(&ctx, 0).await.unwrap(), 3);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_loop_threads_offset_between_polls() {
        let (_tmp, messenger, mut ctx) = setup(&[stored("V", "cola", true)]).await;
        let mut settings = Settings::default();
        settings.schedule.command_interval_secs = 1;
        ctx.settings = Arc::new(settings);

        messenger.push_updates(Ok(vec![text_update(40, "status please")]));
        messenger.push_updates(Err(AppError::messaging("timeout")));
        messenger.push_updates(Ok(vec![text_update(41, "status")]));

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run_command_loop(ctx, rx));

        for _ in 0..100 {
            if messenger.offsets().len() >= 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop did not stop")
            .unwrap();

        let offsets = messenger.offsets();
        assert_eq!(&offsets[..3], &[0, 41, 41]);
        assert_eq!(messenger.sent().len(), 2);
    }
}
