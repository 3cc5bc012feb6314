//! Observability counters
//!
//! Atomic counters for monitoring the datagram loop. Cheap enough to update
//! on every packet; read out as a consistent-enough snapshot for logging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for the relay server
#[derive(Debug)]
pub struct Metrics {
    /// Datagrams read off the socket
    pub datagrams_received: AtomicU64,
    /// Datagrams dropped because they did not decode
    pub decode_failures: AtomicU64,
    /// Dispatch tasks spawned
    pub dispatches: AtomicU64,
    /// Replies written back to peers
    pub replies_sent: AtomicU64,
    /// Replies lost to encode or socket-write failures
    pub send_errors: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            datagrams_received: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            dispatches: AtomicU64::new(0),
            replies_sent: AtomicU64::new(0),
            send_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn datagram_received(&self) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dispatch_started(&self) {
        self.dispatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reply_sent(&self) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn send_error(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since the collector was created
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Log a one-line summary of all counters
    pub fn log_summary(&self) {
        info!(
            uptime_secs = self.uptime_secs(),
            datagrams_received = self.datagrams_received.load(Ordering::Relaxed),
            decode_failures = self.decode_failures.load(Ordering::Relaxed),
            dispatches = self.dispatches.load(Ordering::Relaxed),
            replies_sent = self.replies_sent.load(Ordering::Relaxed),
            send_errors = self.send_errors.load(Ordering::Relaxed),
            "relay metrics"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
