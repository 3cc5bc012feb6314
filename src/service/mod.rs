//! # Client Service
//!
//! The request/response surface consumed by the command-line client.

pub mod client;

pub use client::RelayClient;
