// src/server.rs

//! HTTP control endpoint.
//!
//! - `/send-text`: push a test message through the messenger
//! - `/health`: liveness check

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{any, get},
};
use tokio::sync::watch;

use crate::error::Result;
use crate::services::Messenger;

/// Shared state for the control routes.
#[derive(Clone)]
pub struct ServerState {
    messenger: Arc<dyn Messenger>,
    test_message: Arc<str>,
}

impl ServerState {
    pub fn new(messenger: Arc<dyn Messenger>, test_message: impl Into<Arc<str>>) -> Self {
        Self {
            messenger,
            test_message: test_message.into(),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/send-text", any(send_text))
        .route("/health", get(health))
        .with_state(state)
}

async fn send_text(State(state): State<ServerState>) -> (StatusCode, String) {
    match state.messenger.send_message(&state.test_message).await {
        Ok(()) => {
            log::info!("Test message sent via control endpoint");
            (StatusCode::OK, "Message sent to Telegram!".to_string())
        }
        Err(e) => {
            log::warn!("Control endpoint failed to send test message: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to send message: {e}"),
            )
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Serve the control routes on `bind` until shutdown is requested.
pub async fn serve(
    bind: &str,
    state: ServerState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("Control endpoint listening on {}", bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    log::info!("Control endpoint stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pipeline::testing::MockMessenger;

    #[tokio::test]
    async fn test_send_text_success() {
        let messenger = Arc::new(MockMessenger::default());
        let state = ServerState::new(messenger.clone(), "Hello from Telegram Bot!");

        let (status, body) = send_text(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Message sent to Telegram!");
        assert_eq!(messenger.sent(), vec!["Hello from Telegram Bot!"]);
    }

    #[tokio::test]
    async fn test_send_text_failure() {
        let messenger = Arc::new(MockMessenger::failing_on(&["Hello"]));
        let state = ServerState::new(messenger, "Hello from Telegram Bot!");

        let (status, body) = send_text(State(state)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.starts_with("Failed to send message:"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let messenger = Arc::new(MockMessenger::default());
        let state = ServerState::new(messenger, "ping");
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { serve("127.0.0.1:0", state, rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_bind_error() {
        let messenger = Arc::new(MockMessenger::default());
        let state = ServerState::new(messenger, "ping");
        let (_tx, rx) = watch::channel(false);

        assert!(serve("not-an-address", state, rx).await.is_err());
    }
}
