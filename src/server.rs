use std::future::Future;
use std::mem;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::common;
use crate::configuration::ServerConfiguration;
use crate::error::{ExchangeError, Result};
use crate::exchange::SendOutcome;
use crate::payload::normalize;

/// One datagram received by a [`UdpServer`].
#[derive(Debug, Clone)]
pub struct IncomingDatagram {
    /// Observed source address of the datagram.
    pub source: SocketAddr,
    /// The payload, as received.
    pub payload: Bytes,
}

/// Sends follow-up datagrams to an [`IncomingDatagram`]'s source on the
/// server's own bound socket.
#[derive(Clone)]
pub struct Responder {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl Responder {
    /// Sends one datagram back to the peer.
    ///
    /// Fire-and-forget from the server's perspective: no fresh endpoint, no
    /// timeout, terminal on send completion.
    pub async fn reply(&self, payload: impl Into<Bytes>) -> Result<SendOutcome> {
        let start = Instant::now();
        let payload = normalize(payload)?;
        self.socket.send_to(&payload, self.peer).await?;
        Ok(SendOutcome {
            payload,
            latency: start.elapsed(),
        })
    }

    /// The address replies are sent to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

type DataFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type DataCallback = Arc<dyn Fn(IncomingDatagram, Responder) -> DataFuture + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(ExchangeError) + Send + Sync>;

struct Handlers {
    data: Mutex<DataCallback>,
    error: Mutex<ErrorCallback>,
}

struct Bound {
    local_addr: SocketAddr,
    shutdown: Arc<Notify>,
}

enum ServerStatus {
    Stopped,
    Starting,
    Listening(Bound),
}

/// A long-lived UDP endpoint dispatching every inbound datagram to a
/// registered callback.
///
/// Lifecycle is `Stopped -> Listening -> Stopped`; a closed server can be
/// started again and rebinds fresh.
pub struct UdpServer {
    configuration: ServerConfiguration,
    handlers: Arc<Handlers>,
    status: Mutex<ServerStatus>,
}

impl UdpServer {
    /// Creates a server for the given port on the default host.
    pub fn new(port: u16) -> Self {
        Self::with_configuration(ServerConfiguration::new(port))
    }

    pub fn with_configuration(configuration: ServerConfiguration) -> Self {
        let data: DataCallback = Arc::new(|_, _| Box::pin(async {}));
        let error: ErrorCallback = Arc::new(|_| {});
        Self {
            configuration,
            handlers: Arc::new(Handlers {
                data: Mutex::new(data),
                error: Mutex::new(error),
            }),
            status: Mutex::new(ServerStatus::Stopped),
        }
    }

    /// Replaces the datagram callback.
    ///
    /// Callbacks default to a no-op until registered; a replacement takes
    /// effect from the next dispatched datagram, including while the server
    /// is listening.
    pub fn on_data<F, Fut>(&self, callback: F) -> &Self
    where
        F: Fn(IncomingDatagram, Responder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        *self.handlers.data.lock().unwrap() =
            Arc::new(move |incoming, responder| Box::pin(callback(incoming, responder)));
        self
    }

    /// Replaces the transport-error callback.
    ///
    /// Transport errors while listening are routed here; they do not stop
    /// the server.
    pub fn on_error<F>(&self, callback: F) -> &Self
    where
        F: Fn(ExchangeError) + Send + Sync + 'static,
    {
        *self.handlers.error.lock().unwrap() = Arc::new(callback);
        self
    }

    /// Binds the configured address and starts dispatching datagrams.
    ///
    /// Resolves with the bound address (carrying the OS-assigned port when
    /// the configuration asked for port 0). Fails with
    /// [`ExchangeError::AlreadyRunning`] when the server is not stopped,
    /// leaving the existing binding untouched; a refused bind leaves the
    /// server stopped.
    pub async fn start(&self) -> Result<SocketAddr> {
        {
            let mut status = self.status.lock().unwrap();
            if !matches!(*status, ServerStatus::Stopped) {
                return Err(ExchangeError::AlreadyRunning);
            }
            *status = ServerStatus::Starting;
        }
        match self.bind_and_dispatch().await {
            Ok(bound) => {
                let local_addr = bound.local_addr;
                *self.status.lock().unwrap() = ServerStatus::Listening(bound);
                Ok(local_addr)
            }
            Err(err) => {
                *self.status.lock().unwrap() = ServerStatus::Stopped;
                Err(err)
            }
        }
    }

    async fn bind_and_dispatch(&self) -> Result<Bound> {
        let bind_addr = common::resolve(&self.configuration.host, self.configuration.port).await?;
        let socket = Arc::new(UdpSocket::bind(bind_addr).await?);
        let local_addr = socket.local_addr()?;
        let shutdown = Arc::new(Notify::new());
        tokio::spawn(dispatch_loop(
            socket,
            self.handlers.clone(),
            shutdown.clone(),
            self.configuration.rcv_buffer_size,
        ));
        debug!(%local_addr, "server listening");
        Ok(Bound {
            local_addr,
            shutdown,
        })
    }

    /// Whether the server is currently listening.
    pub fn is_listening(&self) -> bool {
        matches!(*self.status.lock().unwrap(), ServerStatus::Listening(_))
    }

    /// Bound address while listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.status.lock().unwrap() {
            ServerStatus::Listening(bound) => Some(bound.local_addr),
            _ => None,
        }
    }

    /// Stops dispatching and releases the endpoint.
    ///
    /// A no-op when already stopped. Chainable.
    pub fn close(&self) -> &Self {
        let mut status = self.status.lock().unwrap();
        if matches!(*status, ServerStatus::Listening(_)) {
            if let ServerStatus::Listening(bound) =
                mem::replace(&mut *status, ServerStatus::Stopped)
            {
                bound.shutdown.notify_one();
                debug!(local_addr = %bound.local_addr, "server closed");
            }
        }
        self
    }
}

impl Drop for UdpServer {
    fn drop(&mut self) {
        self.close();
    }
}

async fn dispatch_loop(
    socket: Arc<UdpSocket>,
    handlers: Arc<Handlers>,
    shutdown: Arc<Notify>,
    rcv_buffer_size: usize,
) {
    let mut buf = vec![0_u8; rcv_buffer_size];
    loop {
        let received = tokio::select! {
            _ = shutdown.notified() => break,
            received = socket.recv_from(&mut buf) => received,
        };
        match received {
            Ok((size, source)) => {
                trace!(%source, bytes = size, "datagram dispatched");
                let incoming = IncomingDatagram {
                    source,
                    payload: Bytes::copy_from_slice(&buf[..size]),
                };
                let responder = Responder {
                    socket: socket.clone(),
                    peer: source,
                };
                let callback = handlers.data.lock().unwrap().clone();
                callback(incoming, responder).await;
            }
            Err(err) => {
                warn!(%err, "transport error while listening");
                let callback = handlers.error.lock().unwrap().clone();
                callback(ExchangeError::Transport(err));
            }
        }
    }
}
