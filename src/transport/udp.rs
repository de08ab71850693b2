//! UDP Transport
//!
//! Connected UDP socket with a bounded receive buffer.

use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::protocol::{Frame, MAX_RESPONSE_LEN};
use super::{CancelToken, Transport};

/// Longest single blocking wait; bounds how late a cancellation is noticed
const POLL_SLICE: Duration = Duration::from_millis(25);

/// UDP link to the simulator
pub struct UdpTransport {
    /// Socket bound to an ephemeral local port and connected to the peer
    socket: UdpSocket,

    /// Simulator endpoint
    peer: SocketAddr,

    /// Receive buffer, fixed capacity
    buf: [u8; MAX_RESPONSE_LEN],
}

impl UdpTransport {
    /// Bind an ephemeral local port and connect to the configured simulator
    pub fn open(config: &Config) -> Result<Self> {
        let remote = config.remote_addr();
        let peer = remote
            .to_socket_addrs()
            .map_err(|e| LinkError::TransportInit(format!("cannot resolve {}: {}", remote, e)))?
            .next()
            .ok_or_else(|| LinkError::TransportInit(format!("no address for {}", remote)))?;

        let local: SocketAddr = if peer.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(local)
            .map_err(|e| LinkError::TransportInit(format!("bind {} failed: {}", local, e)))?;
        socket
            .connect(peer)
            .map_err(|e| LinkError::TransportInit(format!("connect {} failed: {}", peer, e)))?;

        tracing::debug!(
            "UDP transport {} -> {}",
            socket.local_addr().map(|a| a.to_string()).unwrap_or_default(),
            peer
        );

        Ok(Self {
            socket,
            peer,
            buf: [0u8; MAX_RESPONSE_LEN],
        })
    }

    /// Get the simulator address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Get the local (ephemeral) address
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Copy the received payload up to the first NUL byte
    fn take_payload(&self, len: usize) -> Result<Frame> {
        let payload = &self.buf[..len];
        let end = payload.iter().position(|&b| b == 0).unwrap_or(len);
        if end == 0 {
            return Err(LinkError::Recv("empty datagram".to_string()));
        }
        Ok(Frame::new(Bytes::copy_from_slice(&payload[..end])))
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, frame: &Frame) -> Result<()> {
        let sent = self
            .socket
            .send(frame.as_bytes())
            .map_err(|e| LinkError::Send(e.to_string()))?;

        if sent != frame.len() {
            return Err(LinkError::Send(format!(
                "short write: {} of {} bytes",
                sent,
                frame.len()
            )));
        }

        tracing::trace!("sent {:?} to {}", frame, self.peer);
        Ok(())
    }

    fn receive(&mut self, timeout: Duration, cancel: &CancelToken) -> Result<Frame> {
        let deadline = Instant::now() + timeout;

        loop {
            if cancel.take() {
                return Err(LinkError::Cancelled);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(LinkError::TimedOut(timeout.as_millis() as u64));
            }

            // A zero read timeout means "block forever", so never pass one
            let wait = (deadline - now).min(POLL_SLICE).max(Duration::from_millis(1));
            self.socket.set_read_timeout(Some(wait))?;

            match self.socket.recv(&mut self.buf) {
                Ok(len) => {
                    let frame = self.take_payload(len)?;
                    tracing::trace!("received {:?} from {}", frame, self.peer);
                    return Ok(frame);
                }
                Err(ref e)
                    if matches!(
                        e.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                    ) =>
                {
                    continue;
                }
                Err(e) => return Err(LinkError::Recv(e.to_string())),
            }
        }
    }

    fn discard_pending(&mut self) -> Result<usize> {
        self.socket.set_nonblocking(true)?;

        let mut dropped = 0;
        let outcome = loop {
            match self.socket.recv(&mut self.buf) {
                Ok(_) => dropped += 1,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => break Ok(()),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                // A queued ICMP error from an earlier send; reading it clears it
                Err(ref e) if e.kind() == ErrorKind::ConnectionRefused
                    || e.kind() == ErrorKind::ConnectionReset =>
                {
                    continue;
                }
                Err(e) => break Err(e),
            }
        };

        self.socket.set_nonblocking(false)?;
        outcome?;

        if dropped > 0 {
            tracing::debug!("discarded {} stale datagram(s) from {}", dropped, self.peer);
        }
        Ok(dropped)
    }
}
