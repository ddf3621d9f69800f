use bytes::Bytes;

use crate::error::{ExchangeError, Result};

/// Largest payload a single UDP/IPv4 datagram can carry:
/// 65_535 - 8 (udp header) - 20 (IP header).
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// Normalizes caller input to raw bytes, checking it fits in one datagram.
pub(crate) fn normalize(input: impl Into<Bytes>) -> Result<Bytes> {
    let payload = input.into();
    if payload.len() > MAX_DATAGRAM_SIZE {
        return Err(ExchangeError::Encoding(payload.len()));
    }
    Ok(payload)
}
