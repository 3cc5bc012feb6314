//! UDP datagram server loop.
//!
//! One socket, one blocking receive loop. Each successfully decoded datagram
//! becomes an independent dispatch task sharing the store handle and socket;
//! replies go back to the captured source address. There is no ordering
//! guarantee between dispatches, even from the same sender.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::core::codec;
use crate::core::frame::MAX_DATAGRAM_SIZE;
use crate::error::Result;
use crate::protocol::Dispatcher;
use crate::store::MessageStore;
use crate::utils::metrics::Metrics;

/// Datagram relay server.
///
/// Concurrent dispatch is capped by a semaphore; when saturated the receive
/// loop waits for a permit, which bounds in-flight work without changing the
/// no-ordering contract.
pub struct RelayServer<S> {
    socket: Arc<UdpSocket>,
    dispatcher: Arc<Dispatcher<S>>,
    permits: Arc<Semaphore>,
    metrics: Arc<Metrics>,
}

impl<S: MessageStore + 'static> RelayServer<S> {
    /// Bind the server socket. A bind failure is fatal: the loop cannot run
    /// without its socket.
    pub async fn bind(addr: &str, store: S, dispatch_limit: usize) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        info!(address = %socket.local_addr()?, "listening for datagrams");

        Ok(Self {
            socket: Arc::new(socket),
            dispatcher: Arc::new(Dispatcher::new(store)),
            permits: Arc::new(Semaphore::new(dispatch_limit)),
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Address the socket actually bound to (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Server metrics handle.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the receive loop forever.
    ///
    /// Per-datagram read and decode failures are logged and the loop
    /// continues; only losing the socket itself would end it.
    pub async fn run(&self) -> Result<()> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "read error");
                    continue;
                }
            };
            self.metrics.datagram_received();

            let packet = match codec::decode(&buf[..len]) {
                Ok(packet) => packet,
                Err(e) => {
                    self.metrics.decode_failure();
                    warn!(peer = %peer, error = %e, "undecodable datagram dropped");
                    continue;
                }
            };
            debug!(peer = %peer, "received packet");

            // Acquire before spawning so in-flight dispatches stay bounded.
            // The semaphore is never closed, so acquire cannot fail.
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                continue;
            };

            let socket = Arc::clone(&self.socket);
            let dispatcher = Arc::clone(&self.dispatcher);
            let metrics = Arc::clone(&self.metrics);
            self.metrics.dispatch_started();

            tokio::spawn(async move {
                let _permit = permit;
                let Some(reply) = dispatcher.dispatch(packet, peer.ip()).await else {
                    return;
                };

                match codec::encode(&reply) {
                    Ok(bytes) => match socket.send_to(&bytes, peer).await {
                        Ok(_) => metrics.reply_sent(),
                        Err(e) => {
                            metrics.send_error();
                            warn!(peer = %peer, error = %e, "reply send failed");
                        }
                    },
                    Err(e) => {
                        metrics.send_error();
                        warn!(peer = %peer, error = %e, "reply encode failed");
                    }
                }
            });
        }
    }
}
