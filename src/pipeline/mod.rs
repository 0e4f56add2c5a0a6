//! Pipeline entry points.
//!
//! - `run_cycle` / `run_availability_loop`: fetch → match → diff → notify → persist
//! - `poll_commands` / `run_command_loop`: answer `status` requests from the chat
//! - `run_service`: both loops plus the HTTP control endpoint
//! - `run_discover`: build venue config entries from the retail page

mod commands;
mod context;
mod cycle;
pub mod diff;
#[cfg(feature = "discover")]
mod discover;
pub mod matcher;
mod service;

use std::time::Duration;

use tokio::sync::watch;

pub use commands::{format_digest, is_status_request, poll_commands, run_command_loop};
pub use context::Context;
pub use cycle::{CycleReport, run_availability_loop, run_cycle};
pub use diff::{NotifyOutcome, Transition, detect_transitions, diff_and_notify};
#[cfg(feature = "discover")]
pub use discover::run_discover;
pub use matcher::{find_match, match_availability};
pub use service::run_service;

/// Sleep for `period` unless shutdown is requested first.
///
/// Returns `true` when the caller should stop.
pub(crate) async fn sleep_or_shutdown(
    shutdown: &mut watch::Receiver<bool>,
    period: Duration,
) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(period) => *shutdown.borrow(),
        changed = shutdown.changed() => changed.is_err() || *shutdown.borrow(),
    }
}
