use std::net::SocketAddr;
use tokio::io::{Error, ErrorKind};
use tokio::net::lookup_host;

use crate::error::Result;

/// Resolves `host:port` to a socket address, preferring IPv4 since every
/// endpoint this crate opens is an IPv4 socket.
pub(crate) async fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    let candidates: Vec<SocketAddr> = lookup_host((host, port)).await?.collect();
    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound,
                format!("no address found for {host}:{port}"),
            )
            .into()
        })
}
