//! # Core Protocol Components
//!
//! Low-level frame handling and binary serialization.
//!
//! This module provides the foundation for the relay protocol: the datagram
//! envelope and the encode/decode path between packets and raw bytes.
//!
//! ## Components
//! - **Frame**: Binary datagram format with magic bytes and a length field
//! - **Codec**: Packet-to-bytes encoding built on the frame
//!
//! ## Wire Format
//! ```text
//! [Magic(4)] [Version(1)] [Length(4)] [Payload(N)]
//! ```
//!
//! ## Limits
//! - Maximum datagram size: 64 KiB (one UDP datagram)
//! - Length validation before allocation

pub mod codec;
pub mod frame;
