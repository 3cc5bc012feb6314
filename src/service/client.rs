//! Relay client: one connected UDP socket, one fixed read timeout, no retry.

use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::core::codec;
use crate::core::frame::MAX_DATAGRAM_SIZE;
use crate::error::{RelayError, Result};
use crate::protocol::message::{Message, Packet};

/// Default window to wait for a reply before giving up
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of the relay protocol.
///
/// Each operation performs exactly one send and, for query/fetch, one
/// blocking read bounded by the response timeout. A timeout surfaces as
/// [`RelayError::Timeout`]; no retry is attempted.
pub struct RelayClient {
    socket: UdpSocket,
    response_timeout: Duration,
}

impl RelayClient {
    /// Bind an ephemeral local port and connect it to the server address.
    pub async fn connect(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(addr).await?;

        Ok(Self {
            socket,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        })
    }

    /// Set a custom response timeout
    pub fn with_response_timeout(mut self, response_timeout: Duration) -> Self {
        self.response_timeout = response_timeout;
        self
    }

    /// List the message ids held in `mailbox`.
    #[instrument(skip(self), level = "debug")]
    pub async fn query(&self, mailbox: &str) -> Result<Vec<String>> {
        let request = Packet::Query {
            mailbox: mailbox.to_string(),
        };

        match self.request(&request).await? {
            Packet::MessageIds { ids, .. } => Ok(ids),
            _ => Err(RelayError::UnexpectedMessage),
        }
    }

    /// Retrieve messages from `mailbox` by id.
    #[instrument(skip(self, ids), level = "debug")]
    pub async fn fetch(&self, mailbox: &str, ids: Vec<String>) -> Result<Vec<Message>> {
        let request = Packet::Fetch {
            mailbox: mailbox.to_string(),
            ids,
        };

        match self.request(&request).await? {
            Packet::Messages { messages } => Ok(messages),
            _ => Err(RelayError::UnexpectedMessage),
        }
    }

    /// Deposit `body` into `mailbox`. Fire-and-forget: no reply is read.
    ///
    /// Id, sender, and timestamp are left empty on the wire; the server
    /// assigns all three.
    #[instrument(skip(self, body), level = "debug")]
    pub async fn send(&self, mailbox: &str, body: &str) -> Result<()> {
        let packet = Packet::Send {
            messages: vec![Message {
                id: String::new(),
                mailbox: mailbox.to_string(),
                sender: String::new(),
                timestamp: String::new(),
                body: body.to_string(),
            }],
        };

        self.socket.send(&codec::encode(&packet)?).await?;
        Ok(())
    }

    /// One send, one timed read.
    async fn request(&self, packet: &Packet) -> Result<Packet> {
        self.socket.send(&codec::encode(packet)?).await?;
        debug!(timeout_ms = ?self.response_timeout.as_millis(), "awaiting reply");

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let len = timeout(self.response_timeout, self.socket.recv(&mut buf))
            .await
            .map_err(|_| RelayError::Timeout)??;

        codec::decode(&buf[..len])
    }
}
