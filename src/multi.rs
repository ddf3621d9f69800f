use std::time::Duration;

use bytes::Bytes;
use futures::future::try_join_all;

use crate::error::Result;
use crate::exchange::{request, send, ResponseOutcome, SendOutcome};

/// Performs one [`send`] per payload, strictly in list order.
///
/// Item `i + 1` is not attempted until item `i` succeeded. The first failure
/// aborts the batch and discards the outcomes collected so far.
pub async fn send_multi<P>(
    host: &str,
    port: u16,
    payloads: impl IntoIterator<Item = P>,
    timeout: Option<Duration>,
) -> Result<Vec<SendOutcome>>
where
    P: Into<Bytes>,
{
    let mut outcomes = Vec::new();
    for payload in payloads {
        outcomes.push(send(host, port, payload, timeout).await?);
    }
    Ok(outcomes)
}

/// Performs all sends concurrently, each on its own endpoint with its own
/// timeout.
///
/// Outcomes keep input order regardless of completion order. The first
/// failure wins and the remaining exchanges are dropped.
pub async fn send_multi_parallel<P>(
    host: &str,
    port: u16,
    payloads: impl IntoIterator<Item = P>,
    timeout: Option<Duration>,
) -> Result<Vec<SendOutcome>>
where
    P: Into<Bytes>,
{
    try_join_all(
        payloads
            .into_iter()
            .map(|payload| send(host, port, payload, timeout)),
    )
    .await
}

/// Performs one [`request`] exchange per payload, strictly in list order.
///
/// Item `i + 1` is not attempted until item `i`'s reply arrived. The first
/// failure aborts the batch and discards the outcomes collected so far.
pub async fn request_multi<P>(
    host: &str,
    port: u16,
    payloads: impl IntoIterator<Item = P>,
    timeout: Option<Duration>,
) -> Result<Vec<ResponseOutcome>>
where
    P: Into<Bytes>,
{
    let mut outcomes = Vec::new();
    for payload in payloads {
        outcomes.push(request(host, port, payload, timeout).await?);
    }
    Ok(outcomes)
}

/// Performs all request exchanges concurrently, each on its own endpoint
/// with its own timeout.
///
/// Outcomes keep input order regardless of completion order. The first
/// failure wins and the remaining exchanges are dropped.
pub async fn request_multi_parallel<P>(
    host: &str,
    port: u16,
    payloads: impl IntoIterator<Item = P>,
    timeout: Option<Duration>,
) -> Result<Vec<ResponseOutcome>>
where
    P: Into<Bytes>,
{
    try_join_all(
        payloads
            .into_iter()
            .map(|payload| request(host, port, payload, timeout)),
    )
    .await
}
