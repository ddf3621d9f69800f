use std::time::Duration;

use crate::payload::MAX_DATAGRAM_SIZE;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Options for a [`UdpServer`](crate::UdpServer)
#[derive(Debug, Clone)]
pub struct ServerConfiguration {
    /// Hostname/IP the server binds to. Default: "localhost".
    pub host: String,
    /// Port the server binds to. Use 0 for an OS-assigned port.
    /// Default: 8080.
    pub port: u16,
    /// Capacity of the buffer each inbound datagram is received into.
    /// The kernel truncates datagrams longer than this.
    /// Default: 65507, the largest payload an IPv4 datagram can carry.
    pub rcv_buffer_size: usize,
}

impl ServerConfiguration {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            rcv_buffer_size: MAX_DATAGRAM_SIZE,
        }
    }
}

/// Every wait is bounded. An omitted bound, a zero bound or `Duration::MAX`
/// fall back to the 1000 ms default.
pub(crate) fn effective_timeout(timeout: Option<Duration>) -> Duration {
    match timeout {
        Some(bound) if bound > Duration::ZERO && bound < Duration::MAX => bound,
        _ => DEFAULT_TIMEOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_timeouts_fall_back_to_the_default() {
        assert_eq!(effective_timeout(None), DEFAULT_TIMEOUT);
        assert_eq!(effective_timeout(Some(Duration::ZERO)), DEFAULT_TIMEOUT);
        assert_eq!(effective_timeout(Some(Duration::MAX)), DEFAULT_TIMEOUT);
        assert_eq!(
            effective_timeout(Some(Duration::from_millis(50))),
            Duration::from_millis(50)
        );
    }
}
