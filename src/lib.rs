//! # mailbox-relay
//!
//! A minimal mailbox relay over UDP: clients submit messages to named
//! mailboxes and later list or retrieve them, using small binary-encoded
//! requests carried over an unreliable datagram transport.
//!
//! ## Architecture
//! - [`core`] — the datagram envelope and packet codec
//! - [`protocol`] — wire packet types and the request dispatcher
//! - [`store`] — the storage-engine seam and its SQLite implementation
//! - [`transport`] — the UDP receive loop and concurrent dispatch
//! - [`service`] — the client used by the command-line surface
//! - [`config`] / [`error`] / [`utils`] — configuration, errors, logging,
//!   and metrics
//!
//! ## Data Flow
//! ```text
//! raw bytes → codec::decode → Dispatcher (store reads/writes) → codec::encode → raw bytes
//! ```
//!
//! Replies go back to the datagram's source address on the same socket; there
//! is no ordering guarantee between dispatches and no delivery guarantee
//! beyond what UDP provides.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod store;
pub mod transport;
pub mod utils;

pub use error::{RelayError, Result};
