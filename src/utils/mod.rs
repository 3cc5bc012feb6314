//! # Utility Modules
//!
//! Supporting utilities for logging and observability.
//!
//! ## Components
//! - **Logging**: tracing subscriber configuration
//! - **Metrics**: thread-safe counters for the server loop

pub mod logging;
pub mod metrics;

pub use metrics::Metrics;
