//! # Mailbox Store
//!
//! Durable table mapping (mailbox, message id) → message record.
//!
//! The [`MessageStore`] trait is the storage-engine seam: the server owns one
//! engine handle and passes it by reference into every dispatch unit. The
//! engine's own transactional machinery is the only concurrency control —
//! no application-level locking is layered on top.
//!
//! ## Components
//! - **MessageStore**: the {insert, list_ids, fetch} contract
//! - **SqliteStore**: sqlx-backed SQLite implementation

pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::message::Message;

pub use sqlite::SqliteStore;

/// One row of the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: i64,
    pub mailbox: String,
    pub sender: String,
    pub timestamp: String,
    pub body: String,
}

impl From<StoredMessage> for Message {
    fn from(row: StoredMessage) -> Message {
        Message {
            id: row.id.to_string(),
            mailbox: row.mailbox,
            sender: row.sender,
            timestamp: row.timestamp,
            body: row.body,
        }
    }
}

/// Storage-engine contract for mailbox persistence.
///
/// Implementations must serialize writes; reads may proceed under the
/// engine's own isolation guarantees.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert a message, assigning its id and timestamp. Returns the new id.
    async fn insert(&self, mailbox: &str, sender: &str, body: &str) -> Result<i64>;

    /// Ids of every message in `mailbox`, in id order. Empty if the mailbox
    /// is unknown or empty.
    async fn list_ids(&self, mailbox: &str) -> Result<Vec<i64>>;

    /// Stored messages for the requested ids, in request order. An id is
    /// skipped silently when it does not exist, belongs to a different
    /// mailbox, or is not a decimal id string.
    async fn fetch(&self, mailbox: &str, ids: &[String]) -> Result<Vec<StoredMessage>>;
}
