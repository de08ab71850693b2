//! Frame definitions
//!
//! One complete request or answer payload.

use std::fmt;

use bytes::Bytes;

/// Operation marker carried in the first byte of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Marker {
    Request = b'R',
    Answer = b'A',
}

impl Marker {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'R' => Some(Marker::Request),
            b'A' => Some(Marker::Answer),
            _ => None,
        }
    }
}

/// An immutable wire frame
///
/// Cloning is cheap (reference counted), so a frame can be handed out of the
/// session lock and decoded by the caller.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Frame(Bytes);

impl Frame {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Frame(bytes.into())
    }

    pub fn from_static(bytes: &'static [u8]) -> Self {
        Frame(Bytes::from_static(bytes))
    }

    /// Marker of this frame, if the first byte is a known one
    pub fn marker(&self) -> Option<Marker> {
        self.0.first().copied().and_then(Marker::from_byte)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for Frame {
    fn from(bytes: Bytes) -> Self {
        Frame(bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
