// Loopback listener module
// Creates the TCP listener the accept loop reads from

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::{Result, ServerError};

/// Create a `TcpListener` bound to a loopback address.
///
/// `SO_REUSEADDR` is set so a restart does not trip over `TIME_WAIT`, but
/// `SO_REUSEPORT` is not: a second instance on the same port fails to bind.
/// Must be called from within a Tokio runtime.
pub fn create_loopback_listener(addr: SocketAddr) -> Result<TcpListener> {
    if !addr.ip().is_loopback() {
        return Err(ServerError::NonLoopback(addr));
    }

    let bind_err = |source| ServerError::Bind { addr, source };

    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(bind_err)?;

    socket.set_reuse_address(true).map_err(bind_err)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true).map_err(bind_err)?;

    socket.bind(&addr.into()).map_err(bind_err)?;

    // Backlog queue size of 128
    socket.listen(128).map_err(bind_err)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener).map_err(bind_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binds_loopback() {
        let listener = create_loopback_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let local = listener.local_addr().unwrap();
        assert!(local.ip().is_loopback());
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn test_rejects_wildcard() {
        let result = create_loopback_listener("0.0.0.0:0".parse().unwrap());
        assert!(matches!(result, Err(ServerError::NonLoopback(_))));
    }

    #[tokio::test]
    async fn test_port_in_use() {
        let first = create_loopback_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();
        let second = create_loopback_listener(addr);
        assert!(matches!(second, Err(ServerError::Bind { .. })));
    }
}
