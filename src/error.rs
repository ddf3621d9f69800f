use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Failure modes of exchanges and of the server lifecycle.
///
/// Each operation produces exactly one terminal outcome, so at most one of
/// these is ever observed per call.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The payload does not fit in a single UDP datagram. Raised before the
    /// transport is touched.
    #[error("payload of {0} bytes does not fit in a single UDP datagram")]
    Encoding(usize),
    /// The underlying socket refused a bind, send or receive.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    /// No terminal outcome within the timeout bound.
    #[error("no terminal outcome within {0:?}")]
    Timeout(Duration),
    /// `start` was called on a server that is already listening.
    #[error("server already running")]
    AlreadyRunning,
}
