//! # Packet Types
//!
//! The tagged request/reply envelope exchanged over the transport.
//!
//! Exactly one payload is active per tag: the variant *is* the tag, so a
//! datagram can never carry a `Query` tag with a `Messages` body. Field-level
//! malformation (empty mailbox, empty id list, empty message list) is still
//! representable and is handled by the dispatcher, not the codec.

use serde::{Deserialize, Serialize};

/// A stored unit of mail as it appears on the wire.
///
/// `sender` and `timestamp` are assigned by the server at insert time; any
/// caller-supplied values are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub mailbox: String,
    pub sender: String,
    pub timestamp: String,
    pub body: String,
}

/// Request/reply packet.
///
/// Requests: `Query`, `Fetch`, `Send`. Replies: `MessageIds` (for Query) and
/// `Messages` (for Fetch). Send is fire-and-forget and has no reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Packet {
    /// List the ids held in a mailbox.
    Query { mailbox: String },

    /// Retrieve specific messages from a mailbox by id.
    Fetch { mailbox: String, ids: Vec<String> },

    /// Deposit a message into a mailbox. Only the first entry is persisted.
    Send { messages: Vec<Message> },

    /// Reply to `Query`: the mailbox echoed back with its message ids.
    MessageIds { mailbox: String, ids: Vec<String> },

    /// Reply to `Fetch`: zero or more stored messages.
    Messages { messages: Vec<Message> },
}
