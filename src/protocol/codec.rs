//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! R/30/32/64\0
//! │ └┬┘└┬┘└─┬┘
//! │  │  │   └── code with argument (engine index 0)
//! │  │  └────── plain code
//! │  └───────── plain code
//! └──────────── request marker
//! ```
//!
//! ### Answer
//! ```text
//! A/30\250.5/32\1.2/64\0\1850.0
//! ```
//! Values follow their code after `skip` secondary delimiters: 1 for plain
//! codes, 2 for codes that echo an index argument.

use bytes::{BufMut, BytesMut};

use crate::error::{LinkError, Result};
use super::{Code, Frame, Marker, DELIM_PRIMARY, DELIM_SECONDARY, MAX_REQUEST_LEN};

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request frame for the given codes
///
/// Format: `R` + (`/` + code)*
pub fn encode_request(codes: &[Code]) -> Result<Frame> {
    let mut buf = BytesMut::with_capacity(MAX_REQUEST_LEN);
    encode_into(&mut buf, codes)?;
    Ok(Frame::new(buf.freeze()))
}

/// Encode a request into an existing buffer, replacing its contents
///
/// The buffer is left empty if encoding fails. Frames longer than
/// [`MAX_REQUEST_LEN`] are rejected, never truncated.
pub fn encode_into(buf: &mut BytesMut, codes: &[Code]) -> Result<()> {
    buf.clear();

    if codes.is_empty() {
        return Err(LinkError::Encoding("empty code list".to_string()));
    }

    let total = 1 + codes.iter().map(|c| 1 + c.len()).sum::<usize>();
    if total > MAX_REQUEST_LEN {
        return Err(LinkError::Encoding(format!(
            "request of {} bytes exceeds {} byte limit",
            total, MAX_REQUEST_LEN
        )));
    }

    for code in codes {
        validate_code(code)?;
    }

    buf.reserve(total);
    buf.put_u8(Marker::Request as u8);
    for code in codes {
        buf.put_u8(DELIM_PRIMARY);
        buf.put_slice(code.as_str().as_bytes());
    }

    Ok(())
}

/// Codes must be non-empty printable ASCII without a primary delimiter
fn validate_code(code: &Code) -> Result<()> {
    if code.is_empty() {
        return Err(LinkError::Encoding("empty code".to_string()));
    }
    let bad = code
        .as_str()
        .bytes()
        .any(|b| b == DELIM_PRIMARY || !b.is_ascii_graphic());
    if bad {
        return Err(LinkError::Encoding(format!("invalid code {:?}", code.as_str())));
    }
    Ok(())
}

/// Format a float argument the way the simulator expects (`0.500000`)
pub fn format_argument(value: f32) -> String {
    format!("{:.6}", value)
}

// =============================================================================
// Answer Decoding
// =============================================================================

/// Check that a received payload is an answer frame
pub fn validate_answer(frame: Frame) -> Result<Frame> {
    match frame.marker() {
        Some(Marker::Answer) => Ok(frame),
        _ => Err(LinkError::MalformedAnswer(format!(
            "expected leading 'A', got {:?}",
            frame
        ))),
    }
}

/// Extract the value associated with `code` from an answer frame
///
/// Locates `code` in the frame, passes `skip` secondary delimiters counted
/// from the start of the match, then returns the bytes up to the next
/// delimiter or the end of the frame.
///
/// Matching is by substring. An occurrence that starts a group (right after
/// the marker or a `/`) and ends at a delimiter is preferred; otherwise the
/// first occurrence anywhere is used. The DeviceLink vocabulary is chosen so
/// that codes do not collide with each other, but a numeric value such as
/// `140.5` contains the text of code `40`, so a frame that lacks the group
/// for the requested code may still yield a match inside another group's
/// value. Callers should only decode codes they actually requested.
pub fn decode_value<'a, C: AsRef<str>>(frame: &'a Frame, code: C, skip: usize) -> Result<&'a [u8]> {
    let code = code.as_ref();
    let bytes = frame.as_bytes();
    let needle = code.as_bytes();

    let start = find_group(bytes, needle)
        .or_else(|| find(bytes, needle))
        .ok_or_else(|| LinkError::NoMatchingCode(code.to_string()))?;

    // Walk past `skip` secondary delimiters without leaving the group
    let mut pos = start;
    let mut skipped = 0;
    while skipped < skip {
        match bytes.get(pos) {
            Some(&DELIM_SECONDARY) => skipped += 1,
            Some(&DELIM_PRIMARY) | Some(&0) | None => {
                return Err(LinkError::EmptyValue(code.to_string()));
            }
            Some(_) => {}
        }
        pos += 1;
    }

    let len = bytes[pos..]
        .iter()
        .position(|&b| is_delimiter(b))
        .unwrap_or(bytes.len() - pos);

    if len == 0 {
        return Err(LinkError::EmptyValue(code.to_string()));
    }

    Ok(&bytes[pos..pos + len])
}

fn is_delimiter(byte: u8) -> bool {
    byte == DELIM_SECONDARY || byte == DELIM_PRIMARY || byte == 0
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// First occurrence of `needle` that forms a whole code at a group start
fn find_group(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let starts_group = pos == 1 || (pos > 0 && haystack[pos - 1] == DELIM_PRIMARY);
            let ends_code = haystack
                .get(pos + needle.len())
                .map_or(true, |&b| is_delimiter(b));
            starts_group && ends_code
        })
}

// =============================================================================
// Value Coercion
// =============================================================================

/// Interpret a decoded value as text
pub fn to_text(value: &[u8]) -> Result<String> {
    std::str::from_utf8(value)
        .map(str::to_string)
        .map_err(|_| LinkError::ParseFailure {
            value: String::from_utf8_lossy(value).into_owned(),
            expected: "text",
        })
}

/// Parse a decoded value as a float
pub fn to_float(value: &[u8]) -> Result<f32> {
    let text = ascii(value, "float")?;
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LinkError::ParseFailure {
            value: text.to_string(),
            expected: "float",
        })
}

/// Parse a decoded value as an integer
///
/// Whole-number floats such as `1.0` are accepted because some simulator
/// builds format flags that way.
pub fn to_int(value: &[u8]) -> Result<i32> {
    let text = ascii(value, "int")?;
    if let Ok(v) = text.parse::<i32>() {
        return Ok(v);
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32)
        .ok_or_else(|| LinkError::ParseFailure {
            value: text.to_string(),
            expected: "int",
        })
}

fn ascii<'a>(value: &'a [u8], expected: &'static str) -> Result<&'a str> {
    std::str::from_utf8(value)
        .map(str::trim)
        .map_err(|_| LinkError::ParseFailure {
            value: String::from_utf8_lossy(value).into_owned(),
            expected,
        })
}
