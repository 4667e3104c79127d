use crate::components::CardHandle;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Stop the card actor after a termination signal
pub async fn shutdown_card(handle: &CardHandle) {
    if let Err(e) = handle.shutdown().await {
        error!("Error shutting down card: {:?}", e);
    } else {
        info!("Card shut down successfully");
    }
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
pub async fn wait_for_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!("Failed to create SIGTERM signal handler: {}", e);
            wait_for_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = wait_for_ctrl_c() => {}
    }
}

/// Wait for Ctrl+C
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal, initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}
