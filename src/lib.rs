mod common;
mod configuration;
mod endpoint;
mod error;
mod exchange;
mod multi;
mod payload;
mod server;

pub use configuration::ServerConfiguration;
pub use error::{ExchangeError, Result};
pub use exchange::{request, send, ResponseOutcome, SendOutcome};
pub use multi::{request_multi, request_multi_parallel, send_multi, send_multi_parallel};
pub use payload::MAX_DATAGRAM_SIZE;
pub use server::{IncomingDatagram, Responder, UdpServer};
