// Signal handling module
//
// Only the interrupt signal (SIGINT / Ctrl+C) is handled: it requests a
// graceful stop of the accept loop. Every other signal keeps its default
// behaviour.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Shutdown signal shared between the signal task and the accept loop
#[derive(Debug, Default)]
pub struct SignalHandler {
    shutdown: Notify,
    shutdown_requested: AtomicBool,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the accept loop to stop. Safe to call more than once.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        // notify_one keeps a permit if nobody is waiting yet
        self.shutdown.notify_one();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown has been requested
    pub async fn wait_for_shutdown(&self) {
        while !self.is_shutdown_requested() {
            self.shutdown.notified().await;
        }
    }
}

/// Spawn a task that turns the interrupt signal into a shutdown request
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_interrupt_received();
                handler.request_shutdown();
            }
            Err(e) => {
                logger::log_error(&format!("Failed to register interrupt handler: {e}"));
            }
        }
    });
}
