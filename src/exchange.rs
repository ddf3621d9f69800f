use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::{timeout, Instant};
use tracing::trace;

use crate::common;
use crate::configuration::effective_timeout;
use crate::endpoint::EphemeralEndpoint;
use crate::error::{ExchangeError, Result};
use crate::payload::normalize;

/// Outcome of a completed one-way [`send`].
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// The payload, as sent.
    pub payload: Bytes,
    /// Time from the start of the operation to send completion.
    pub latency: Duration,
}

/// Outcome of a completed [`request`] exchange.
#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    /// The reply payload, as received.
    pub payload: Bytes,
    /// The request payload, as sent.
    pub request_payload: Bytes,
    /// Time from the start of the operation to the reply's arrival.
    pub latency: Duration,
    responder: SocketAddr,
    timeout: Duration,
}

impl ResponseOutcome {
    /// Observed source address of the reply.
    pub fn responder(&self) -> SocketAddr {
        self.responder
    }

    /// Opens a new exchange addressed to whoever sent this reply.
    ///
    /// This is a brand-new, independently timed request on a fresh endpoint,
    /// bounded by the same timeout as the exchange that produced this
    /// outcome. It targets the observed source address, so a conversation
    /// follows a responder that migrates to another address or port between
    /// rounds.
    pub async fn reply(&self, payload: impl Into<Bytes>) -> Result<ResponseOutcome> {
        request_to(RequestTarget::Known(self.responder), payload.into(), Some(self.timeout)).await
    }
}

/// Sends one datagram to `host:port` and waits for the transport to accept
/// it.
///
/// A fresh endpoint is bound for the single send and released once the
/// operation reaches a terminal outcome. `timeout_bound` caps the whole
/// operation, name resolution included; `None` means the 1000 ms default.
pub async fn send(
    host: &str,
    port: u16,
    payload: impl Into<Bytes>,
    timeout_bound: Option<Duration>,
) -> Result<SendOutcome> {
    let start = Instant::now();
    let payload = normalize(payload)?;
    let bound = effective_timeout(timeout_bound);
    timeout(bound, async {
        let target = common::resolve(host, port).await?;
        let endpoint = EphemeralEndpoint::open().await?;
        endpoint.send_to(&payload, target).await
    })
    .await
    .map_err(|_| ExchangeError::Timeout(bound))??;
    trace!(host, port, bytes = payload.len(), "datagram sent");
    Ok(SendOutcome {
        payload,
        latency: start.elapsed(),
    })
}

/// Sends one datagram to `host:port` and waits for a single reply.
///
/// The first datagram to arrive on the exchange's ephemeral endpoint is
/// taken as the reply, regardless of its source address; no peer
/// verification is performed. The observed source is exposed through
/// [`ResponseOutcome::responder`] and is the target of
/// [`ResponseOutcome::reply`].
pub async fn request(
    host: &str,
    port: u16,
    payload: impl Into<Bytes>,
    timeout_bound: Option<Duration>,
) -> Result<ResponseOutcome> {
    request_to(RequestTarget::Lookup { host, port }, payload.into(), timeout_bound).await
}

enum RequestTarget<'a> {
    Lookup { host: &'a str, port: u16 },
    Known(SocketAddr),
}

impl RequestTarget<'_> {
    async fn resolve(&self) -> Result<SocketAddr> {
        match *self {
            RequestTarget::Lookup { host, port } => common::resolve(host, port).await,
            RequestTarget::Known(addr) => Ok(addr),
        }
    }
}

async fn request_to(
    target: RequestTarget<'_>,
    payload: Bytes,
    timeout_bound: Option<Duration>,
) -> Result<ResponseOutcome> {
    let start = Instant::now();
    let request_payload = normalize(payload)?;
    let bound = effective_timeout(timeout_bound);
    let (payload, responder) = timeout(bound, async {
        let target = target.resolve().await?;
        let endpoint = EphemeralEndpoint::open().await?;
        endpoint.send_to(&request_payload, target).await?;
        endpoint.recv().await
    })
    .await
    .map_err(|_| ExchangeError::Timeout(bound))??;
    trace!(%responder, bytes = payload.len(), "reply received");
    Ok(ResponseOutcome {
        payload,
        request_payload,
        latency: start.elapsed(),
        responder,
        timeout: bound,
    })
}
