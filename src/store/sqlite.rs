//! SQLite mailbox storage.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::SqlitePool;

use super::{MessageStore, StoredMessage};
use crate::error::Result;

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    mailbox: String,
    sender: String,
    timestamp: String,
    body: Option<String>,
}

impl From<MessageRow> for StoredMessage {
    fn from(r: MessageRow) -> StoredMessage {
        StoredMessage {
            id: r.id,
            mailbox: r.mailbox,
            sender: r.sender,
            timestamp: r.timestamp,
            body: r.body.unwrap_or_default(),
        }
    }
}

/// SQLite-backed storage for mailbox messages.
///
/// The pool is Arc-backed and cheap to clone; all concurrent dispatch units
/// share it and rely on SQLite's own serialization of writes.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `path` and ensure the
    /// `messages` table exists.
    pub async fn connect(path: &Path) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
               id        INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT UNIQUE,
               mailbox   TEXT NOT NULL,
               sender    TEXT NOT NULL,
               timestamp TEXT NOT NULL,
               body      TEXT)",
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn insert(&self, mailbox: &str, sender: &str, body: &str) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO messages (mailbox, sender, timestamp, body) VALUES (?, ?, ?, ?)",
        )
        .bind(mailbox)
        .bind(sender)
        .bind(&now)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_ids(&self, mailbox: &str) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM messages WHERE mailbox = ? ORDER BY id")
                .bind(mailbox)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn fetch(&self, mailbox: &str, ids: &[String]) -> Result<Vec<StoredMessage>> {
        let mut messages = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for id in ids {
            // Non-numeric ids fall in the same bucket as unknown ids.
            let Ok(id) = id.parse::<i64>() else {
                continue;
            };
            // First match wins when an id is requested more than once.
            if !seen.insert(id) {
                continue;
            }

            let row: Option<MessageRow> = sqlx::query_as(
                "SELECT id, mailbox, sender, timestamp, body FROM messages
                 WHERE mailbox = ? AND id = ? LIMIT 1",
            )
            .bind(mailbox)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(row) = row {
                messages.push(row.into());
            }
        }
        Ok(messages)
    }
}
