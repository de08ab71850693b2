//! Session Module
//!
//! The synchronous request/response orchestrator.
//!
//! ## Responsibilities
//! - Encode requests into the single command buffer
//! - Send, then wait a bounded time for the answer
//! - Validate and keep the most recent answer frame
//! - Publish whether the last read succeeded
//!
//! ## Concurrency Model
//! DeviceLink is strictly half-duplex: one request in flight, and the answer
//! that arrives next belongs to it. Every exchange therefore runs under one
//! mutex held from encode to answer validation. Concurrent callers queue on
//! that mutex. Decoding happens afterwards on the caller's own copy of the
//! frame, or inside the lock through [`Session::query_with`] when the
//! decoded values must be stored in exchange order.
//!
//! The read state and the attached flag are atomics written under the mutex,
//! so status checks never wait behind a query in flight.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use bytes::BytesMut;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::protocol::{self, Code, Frame, MAX_REQUEST_LEN, SKIP_PLAIN};
use crate::transport::{CancelToken, Transport, UdpTransport};

/// Outcome of the most recent receive attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReadState {
    /// No query has completed yet
    #[default]
    NotRead,

    /// The last query received a valid answer
    Success,

    /// The last query failed (send, timeout, receive or malformed answer)
    Failure,
}

impl ReadState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ReadState::Success,
            2 => ReadState::Failure,
            _ => ReadState::NotRead,
        }
    }
}

/// Everything one exchange touches, guarded by the session mutex
struct Exchange<T> {
    transport: Option<T>,

    /// Outbound frame under construction
    command: BytesMut,
}

/// A DeviceLink client session
pub struct Session<T: Transport = UdpTransport> {
    config: Config,
    exchange: Mutex<Exchange<T>>,

    /// Most recent valid answer; only written with `exchange` held
    response: Mutex<Option<Frame>>,

    read_state: AtomicU8,
    attached: AtomicBool,
    cancel: CancelToken,
}

impl Session<UdpTransport> {
    /// Create an uninitialized UDP session
    pub fn new(config: Config) -> Self {
        Self::unattached(config)
    }

    /// Open the UDP transport described by the config
    ///
    /// Calling this again replaces the existing transport, which is the way
    /// to reconnect after the simulator restarts.
    pub fn initialize(&self) -> Result<()> {
        let transport = UdpTransport::open(&self.config).map_err(|e| {
            tracing::error!("DeviceLink initialization failed: {}", e);
            e
        })?;
        tracing::info!("DeviceLink session connected to {}", transport.peer_addr());
        self.attach(transport);
        Ok(())
    }
}

impl<T: Transport> Session<T> {
    fn unattached(config: Config) -> Self {
        Self {
            config,
            exchange: Mutex::new(Exchange {
                transport: None,
                command: BytesMut::with_capacity(MAX_REQUEST_LEN),
            }),
            response: Mutex::new(None),
            read_state: AtomicU8::new(ReadState::NotRead as u8),
            attached: AtomicBool::new(false),
            cancel: CancelToken::new(),
        }
    }

    /// Create a session over an already open transport
    pub fn with_transport(config: Config, transport: T) -> Self {
        let session = Self::unattached(config);
        session.attach(transport);
        session
    }

    /// Install (or replace) the transport
    pub fn attach(&self, transport: T) {
        let mut exchange = self.exchange.lock();
        exchange.transport = Some(transport);
        *self.response.lock() = None;
        self.set_read_state(ReadState::NotRead);
        self.attached.store(true, Ordering::Release);
    }

    /// Remove the transport, returning the session to the uninitialized state
    pub fn detach(&self) -> Option<T> {
        let mut exchange = self.exchange.lock();
        self.attached.store(false, Ordering::Release);
        exchange.transport.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Send a request for `codes` and return the validated answer frame
    ///
    /// On any failure the read state becomes [`ReadState::Failure`] and the
    /// error is returned unchanged.
    pub fn query(&self, codes: &[Code]) -> Result<Frame> {
        let mut exchange = self.exchange.lock();
        self.query_locked(&mut exchange, codes)
    }

    /// Like [`Session::query`], but runs `decode` on the answer before the
    /// next exchange can start
    ///
    /// Callers that store decoded values use this so that stores happen in
    /// the same order as the exchanges. `decode` must not call back into the
    /// session.
    pub fn query_with<R>(&self, codes: &[Code], decode: impl FnOnce(&Frame) -> R) -> Result<R> {
        let mut exchange = self.exchange.lock();
        let frame = self.query_locked(&mut exchange, codes)?;
        Ok(decode(&frame))
    }

    fn query_locked(&self, exchange: &mut Exchange<T>, codes: &[Code]) -> Result<Frame> {
        match self.run_exchange(exchange, codes) {
            Ok(frame) => {
                *self.response.lock() = Some(frame.clone());
                self.set_read_state(ReadState::Success);
                Ok(frame)
            }
            Err(e) => {
                tracing::debug!("query {} failed: {}", describe(codes), e);
                *self.response.lock() = None;
                self.set_read_state(ReadState::Failure);
                Err(e)
            }
        }
    }

    /// Encode, send, receive and validate (called with the lock held)
    fn run_exchange(&self, exchange: &mut Exchange<T>, codes: &[Code]) -> Result<Frame> {
        let Exchange {
            transport, command, ..
        } = exchange;
        let transport = transport.as_mut().ok_or(LinkError::NotInitialized)?;

        protocol::encode_into(command, codes)?;
        let request = Frame::new(command.split().freeze());

        transport.discard_pending()?;
        transport.send(&request)?;

        let answer = transport.receive(self.config.receive_timeout(), &self.cancel)?;
        protocol::validate_answer(answer)
    }

    /// Query one code and return its value as text
    pub fn read_value(&self, code: &Code, skip: usize) -> Result<String> {
        let frame = self.query(std::slice::from_ref(code))?;
        protocol::to_text(protocol::decode_value(&frame, code, skip)?)
    }

    /// Query one code and parse its value as a float
    pub fn read_float(&self, code: &Code, skip: usize) -> Result<f32> {
        let frame = self.query(std::slice::from_ref(code))?;
        protocol::to_float(protocol::decode_value(&frame, code, skip)?)
    }

    /// Query one code and parse its value as an integer
    pub fn read_int(&self, code: &Code, skip: usize) -> Result<i32> {
        let frame = self.query(std::slice::from_ref(code))?;
        protocol::to_int(protocol::decode_value(&frame, code, skip)?)
    }

    /// Query a float, collapsing any failure to `0.0`
    ///
    /// A legitimate zero reading and a failed query look the same here; use
    /// [`Session::read_float`] together with [`Session::has_data`] when the
    /// difference matters.
    pub fn query_float(&self, code: &Code) -> f32 {
        self.read_float(code, SKIP_PLAIN).unwrap_or_else(|e| {
            tracing::debug!("query_float({}) -> 0: {}", code, e);
            0.0
        })
    }

    /// Query an integer, collapsing any failure to `0`
    pub fn query_int(&self, code: &Code) -> i32 {
        self.read_int(code, SKIP_PLAIN).unwrap_or_else(|e| {
            tracing::debug!("query_int({}) -> 0: {}", code, e);
            0
        })
    }

    // =========================================================================
    // Commands (no answer expected)
    // =========================================================================

    /// Send a set/toggle code
    pub fn toggle(&self, code: &Code) -> Result<()> {
        self.send_codes(std::slice::from_ref(code))
    }

    /// Send a set code with a float argument (`85\0.500000`)
    pub fn set_value(&self, code: &Code, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(LinkError::InvalidArgument(format!(
                "{} is not a finite value for {}",
                value, code
            )));
        }
        self.toggle(&code.with_arg(protocol::format_argument(value)))
    }

    /// Send a set code with an integer argument (`181\1`)
    pub fn set_int(&self, code: &Code, value: i32) -> Result<()> {
        self.toggle(&code.with_arg(value))
    }

    /// Send several codes in one datagram without waiting for an answer
    pub fn send_codes(&self, codes: &[Code]) -> Result<()> {
        let mut exchange = self.exchange.lock();
        let Exchange {
            transport, command, ..
        } = &mut *exchange;
        let transport = transport.as_mut().ok_or(LinkError::NotInitialized)?;

        protocol::encode_into(command, codes)?;
        let request = Frame::new(command.split().freeze());

        transport.send(&request).map_err(|e| {
            tracing::debug!("command {} not sent: {}", describe(codes), e);
            e
        })
    }

    // =========================================================================
    // State
    // =========================================================================

    /// True if the last query received a valid answer
    pub fn has_data(&self) -> bool {
        self.read_state() == ReadState::Success
    }

    /// Does not wait for a query in flight
    pub fn read_state(&self) -> ReadState {
        ReadState::from_u8(self.read_state.load(Ordering::Acquire))
    }

    fn set_read_state(&self, state: ReadState) {
        self.read_state.store(state as u8, Ordering::Release);
    }

    /// The most recent valid answer frame, if the last query succeeded
    pub fn last_response(&self) -> Option<Frame> {
        self.response.lock().clone()
    }

    /// Token that aborts the receive wait of the query in flight
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn describe(codes: &[Code]) -> String {
    codes
        .iter()
        .map(Code::as_str)
        .collect::<Vec<_>>()
        .join("/")
}
