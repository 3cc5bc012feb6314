//! # Transport Layer
//!
//! The UDP datagram server loop.
//!
//! UDP's connectionless model means concurrent replies interleave freely on
//! the shared socket and no per-peer state is kept.

pub mod udp;

pub use udp::RelayServer;
