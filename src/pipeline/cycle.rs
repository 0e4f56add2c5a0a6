// src/pipeline/cycle.rs

//! Availability cycle: fetch → match → diff → notify → persist.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::models::{AvailabilityResult, Snapshot};
use crate::pipeline::Context;
use crate::pipeline::diff::diff_and_notify;
use crate::pipeline::matcher::match_availability;
use crate::pipeline::sleep_or_shutdown;

/// Summary of one availability cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue_total: usize,
    pub venue_failures: usize,
    pub result_count: usize,
    pub notifications_sent: usize,
    pub notification_failures: usize,
    /// Whether the snapshot file was rewritten
    pub snapshot_written: bool,
}

/// Run one availability cycle over every configured venue.
///
/// Venue failures are logged and skipped; the snapshot is rewritten with
/// whatever results were gathered, even if some venues failed.
pub async fn run_cycle(ctx: &Context) -> CycleReport {
    let start_time = Utc::now();

    let snapshot = match ctx.store.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to load snapshot, comparing against an empty one: {}", e);
            Snapshot::default()
        }
    };

    let mut report = CycleReport {
        start_time,
        end_time: start_time,
        venue_total: ctx.venues.len(),
        venue_failures: 0,
        result_count: 0,
        notifications_sent: 0,
        notification_failures: 0,
        snapshot_written: false,
    };

    // Catalogs are fetched concurrently but handled in configured order.
    let concurrency = ctx.settings.fetch.max_concurrent.max(1);
    let source = Arc::clone(&ctx.catalog);
    let mut fetches = stream::iter(ctx.venues.iter().cloned())
        .map(|venue| {
            let source = Arc::clone(&source);
            async move {
                let fetched = source.fetch_catalog(&venue.endpoint).await;
                (venue, fetched)
            }
        })
        .buffered(concurrency);

    let mut all_results: Vec<AvailabilityResult> = Vec::new();
    while let Some((venue, fetched)) = fetches.next().await {
        log::info!("Processing venue: {}", venue.venue);
        let catalog = match fetched {
            Ok(catalog) => catalog,
            Err(e) => {
                report.venue_failures += 1;
                log::warn!("Failed to fetch catalog for {}: {}", venue.venue, e);
                continue;
            }
        };

        let results = match_availability(&venue, &catalog);
        let outcome = diff_and_notify(ctx.messenger.as_ref(), &results, &snapshot).await;
        report.notifications_sent += outcome.sent;
        report.notification_failures += outcome.failed;

        log::info!(
            "Venue {} processed: {}/{} tracked products available",
            venue.venue,
            results.iter().filter(|r| r.found).count(),
            results.len()
        );
        all_results.extend(results);
    }

    report.result_count = all_results.len();
    match ctx.store.write_results(&all_results).await {
        Ok(meta) => {
            report.snapshot_written = true;
            log::info!(
                "Snapshot written: {} results to {} at {}",
                meta.result_count,
                meta.location,
                meta.timestamp.to_rfc3339()
            );
        }
        Err(e) => log::error!("Failed to write snapshot: {}", e),
    }

    report.end_time = Utc::now();
    report
}

/// Run availability cycles until shutdown is requested.
pub async fn run_availability_loop(ctx: Context, mut shutdown: watch::Receiver<bool>) {
    let interval = ctx.settings.schedule.availability_interval();
    log::info!(
        "Availability loop started: {} venues every {}s",
        ctx.venues.len(),
        interval.as_secs()
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        log::info!("Starting availability cycle");
        let report = run_cycle(&ctx).await;
        log::info!(
            "Cycle finished in {}ms: {} results, {}/{} venues failed, {} notifications sent, {} failed",
            (report.end_time - report.start_time).num_milliseconds(),
            report.result_count,
            report.venue_failures,
            report.venue_total,
            report.notifications_sent,
            report.notification_failures
        );

        if sleep_or_shutdown(&mut shutdown, interval).await {
            break;
        }
    }

    log::info!("Availability loop stopped");
}
