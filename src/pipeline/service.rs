// src/pipeline/service.rs

//! Long-running service: availability loop, command loop and control endpoint.

use tokio::sync::watch;

use crate::pipeline::{Context, run_availability_loop, run_command_loop};
use crate::server::{self, ServerState};

/// Run both loops and, if enabled, the HTTP control endpoint until shutdown.
///
/// The tasks share nothing but the snapshot store. A control endpoint that
/// fails to start is logged; the loops keep running.
pub async fn run_service(ctx: Context, shutdown: watch::Receiver<bool>) {
    let availability = tokio::spawn(run_availability_loop(ctx.clone(), shutdown.clone()));
    let commands = tokio::spawn(run_command_loop(ctx.clone(), shutdown.clone()));

    let control = if ctx.settings.server.enabled {
        let state = ServerState::new(
            ctx.messenger.clone(),
            ctx.settings.telegram.test_message.clone(),
        );
        let bind = ctx.settings.server.bind.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = server::serve(&bind, state, shutdown).await {
                log::error!("Error starting control endpoint on {}: {}", bind, e);
            }
        }))
    } else {
        log::info!("Control endpoint disabled");
        None
    };

    for (name, handle) in [("availability", availability), ("command", commands)] {
        if let Err(e) = handle.await {
            log::error!("{} loop task failed: {}", name, e);
        }
    }
    if let Some(handle) = control {
        if let Err(e) = handle.await {
            log::error!("control endpoint task failed: {}", e);
        }
    }
}
