// Server loop module
// Accepts connections one at a time until shutdown is requested

use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::signal::SignalHandler;
use crate::handler::StaticHandler;
use crate::logger;

/// Accept and serve connections sequentially.
///
/// Shutdown is only observed between connections: a request in flight is
/// always finished first.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_accept_loop(listener: &TcpListener, handler: &StaticHandler, signals: &SignalHandler) {
    loop {
        tokio::select! {
            biased;

            _ = signals.wait_for_shutdown() => break,

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => serve_connection(stream, peer_addr, handler).await,
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
        }
    }
}
