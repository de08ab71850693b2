//! Protocol Module
//!
//! Defines the DeviceLink wire protocol spoken with the simulator.
//!
//! ## Protocol Format (ASCII over UDP)
//!
//! ### Request Format
//! ```text
//! ┌──────┬──────────┬──────────┬─────┐
//! │ 'R'  │ '/' code │ '/' code │ ... │
//! └──────┴──────────┴──────────┴─────┘
//! ```
//! A code may carry an argument after the secondary delimiter, e.g. `64\0`
//! (RPM of engine 0) or `85\0.500000` (set aileron).
//!
//! ### Answer Format
//! ```text
//! ┌──────┬─────────────────────────┬─────────────────────────┬─────┐
//! │ 'A'  │ '/' code '\' value ...  │ '/' code '\' value ...  │ ... │
//! └──────┴─────────────────────────┴─────────────────────────┴─────┘
//! ```
//! Index-parameterised codes echo the index before the value:
//! `A/64\0\1850.0/66\0\45.2`.
//!
//! ### Limits
//! - Requests: at most 64 bytes
//! - Answers: at most 256 bytes

mod code;
mod frame;
mod codec;
pub mod codes;

pub use code::Code;
pub use frame::{Frame, Marker};
pub use codec::{
    decode_value, encode_into, encode_request, format_argument, to_float, to_int, to_text,
    validate_answer,
};

/// Separates code groups in a frame
pub const DELIM_PRIMARY: u8 = b'/';

/// Separates a code from its arguments and values
pub const DELIM_SECONDARY: u8 = b'\\';

/// Maximum size of an outbound request frame
pub const MAX_REQUEST_LEN: usize = 64;

/// Receive buffer capacity for answer frames
pub const MAX_RESPONSE_LEN: usize = 256;

/// Skip count for plain codes (`A/22\P-51`)
pub const SKIP_PLAIN: usize = 1;

/// Skip count for codes that echo an index (`A/64\0\1850.0`)
pub const SKIP_INDEXED: usize = 2;
