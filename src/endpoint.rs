use std::net::{Ipv4Addr, SocketAddr};

use bytes::Bytes;
use tokio::net::UdpSocket;

use crate::error::Result;
use crate::payload::MAX_DATAGRAM_SIZE;

/// A transport endpoint created for one exchange and released at its end.
///
/// Dropping the endpoint closes the underlying socket, so every terminal
/// path of an exchange releases its OS resources.
pub(crate) struct EphemeralEndpoint {
    socket: UdpSocket,
}

impl EphemeralEndpoint {
    /// Binds a fresh IPv4 socket on an OS-assigned port.
    pub async fn open() -> Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        Ok(Self { socket })
    }

    pub async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<()> {
        self.socket.send_to(payload, target).await?;
        Ok(())
    }

    /// Receives the next datagram, whoever sent it.
    pub async fn recv(&self) -> Result<(Bytes, SocketAddr)> {
        let mut buf = vec![0_u8; MAX_DATAGRAM_SIZE];
        let (size, source) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(size);
        Ok((Bytes::from(buf), source))
    }
}
