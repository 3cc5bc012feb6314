use std::net::IpAddr;

use tracing::{debug, error, warn};

use crate::protocol::message::Packet;
use crate::store::MessageStore;

/// Request dispatcher: one transition per inbound packet, no cross-packet
/// state. Holds the storage-engine handle shared by all dispatch units.
pub struct Dispatcher<S> {
    store: S,
}

impl<S: MessageStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Handle one decoded packet from `peer`, returning the reply to send
    /// back, if any.
    ///
    /// Malformed-but-decodable requests are handled permissively: where a
    /// reply is owed an empty one is sent, otherwise the packet is dropped
    /// without a diagnostic to the sender.
    pub async fn dispatch(&self, packet: Packet, peer: IpAddr) -> Option<Packet> {
        match packet {
            Packet::Query { mailbox } => self.query(mailbox).await,
            Packet::Fetch { mailbox, ids } => self.fetch(mailbox, ids).await,
            Packet::Send { messages } => self.send(messages, peer).await,
            // Reply tags arriving as requests are dropped.
            Packet::MessageIds { .. } | Packet::Messages { .. } => {
                debug!("dropping reply-tagged packet");
                None
            }
        }
    }

    async fn query(&self, mailbox: String) -> Option<Packet> {
        let ids = match self.store.list_ids(&mailbox).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(mailbox = %mailbox, error = %e, "query failed");
                return None;
            }
        };

        Some(Packet::MessageIds {
            mailbox,
            ids: ids.iter().map(i64::to_string).collect(),
        })
    }

    async fn fetch(&self, mailbox: String, ids: Vec<String>) -> Option<Packet> {
        // A Fetch always gets a reply, even when the request carries nothing
        // usable or the store fails: the caller is blocked on a read.
        if mailbox.is_empty() || ids.is_empty() {
            return Some(Packet::Messages { messages: vec![] });
        }

        let messages = match self.store.fetch(&mailbox, &ids).await {
            Ok(rows) => rows.into_iter().map(Into::into).collect(),
            Err(e) => {
                warn!(mailbox = %mailbox, error = %e, "fetch failed");
                vec![]
            }
        };

        Some(Packet::Messages { messages })
    }

    async fn send(
        &self,
        messages: Vec<crate::protocol::message::Message>,
        peer: IpAddr,
    ) -> Option<Packet> {
        // Only the first entry is persisted; extras are silently dropped.
        let Some(message) = messages.into_iter().next() else {
            return None;
        };

        // The sender field is the transport source address, never whatever
        // the caller put on the wire.
        let sender = peer.to_string();

        match self
            .store
            .insert(&message.mailbox, &sender, &message.body)
            .await
        {
            Ok(id) => {
                debug!(mailbox = %message.mailbox, id, "message stored");
            }
            Err(e) => {
                error!(mailbox = %message.mailbox, error = %e, "insert failed");
            }
        }

        // Send is fire-and-forget.
        None
    }
}
