//! Transport Module
//!
//! Byte transfer between the client and the simulator.
//!
//! ## Architecture
//! - One connected UDP socket per session
//! - Blocking send, bounded-wait receive
//! - No protocol knowledge beyond "one datagram = one frame"

mod udp;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::Frame;

pub use udp::UdpTransport;

/// A datagram link to the simulator
///
/// Implementations never retry on their own; retry is caller policy.
pub trait Transport: Send {
    /// Send one frame as one datagram
    fn send(&mut self, frame: &Frame) -> Result<()>;

    /// Wait up to `timeout` for one datagram
    ///
    /// Returns `TimedOut` if nothing arrives and `Cancelled` if `cancel`
    /// fires while waiting.
    fn receive(&mut self, timeout: Duration, cancel: &CancelToken) -> Result<Frame>;

    /// Drop datagrams that are already queued, returning how many were dropped
    fn discard_pending(&mut self) -> Result<usize> {
        Ok(0)
    }
}

/// Aborts an in-flight receive wait
///
/// A cancellation is consumed by the receive it interrupts; the next query
/// waits normally.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the current (or next) receive wait stops early
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Consume a pending cancellation
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}
