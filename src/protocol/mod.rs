//! # Protocol Layer
//!
//! Packet types and request dispatch.
//!
//! ## Components
//! - **Message**: the wire `Packet` sum type and the `Message` record
//! - **Dispatcher**: interprets one decoded packet and builds the reply

pub mod dispatcher;
pub mod message;

pub use dispatcher::Dispatcher;
pub use message::{Message, Packet};
