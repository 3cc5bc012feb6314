//! # Error Types
//!
//! Error handling for the mailbox relay.
//!
//! This module defines all error variants that can occur while serving or
//! issuing relay requests, from low-level I/O failures to malformed datagrams.
//!
//! ## Error Categories
//! - **Decode Errors**: datagrams that do not parse as a well-formed envelope
//!   (`InvalidHeader`, `UnsupportedVersion`, `OversizedPacket`, `Serialization`)
//! - **Store Errors**: storage-engine failures surfaced from SQLite
//! - **Transport Errors**: socket bind/read/write failures
//! - **Client Errors**: `Timeout` and `UnexpectedMessage`, seen only by callers
//!   waiting on a reply
//!
//! All errors implement `std::error::Error` for interoperability.

use std::io;
use thiserror::Error;

/// Primary error type for all relay operations
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Invalid packet header")]
    InvalidHeader,

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    #[error("Packet too large: {0} bytes")]
    OversizedPacket(usize),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Timed out waiting for a reply")]
    Timeout,

    #[error("Unexpected reply type")]
    UnexpectedMessage,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using RelayError
pub type Result<T> = std::result::Result<T, RelayError>;
