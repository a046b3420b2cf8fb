// Connection handling module
// Serves a single TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use tokio::net::TcpStream;

use crate::handler::StaticHandler;
use crate::logger;

/// Serve one connection inline.
///
/// Keep-alive is disabled: one request per connection, so a connection never
/// holds the accept loop longer than a single exchange. No timeout is applied.
///
/// Shutdown is best-effort: the interrupt is only observed between
/// connections, and `tokio::signal::ctrl_c` keeps its SIGINT handler installed
/// for the rest of the process, so a second Ctrl+C cannot end a loop stalled
/// here by a slow client.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, handler: &StaticHandler) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(io, service_fn(move |req| handler.handle(req, peer_addr)));

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}
