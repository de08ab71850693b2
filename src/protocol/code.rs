//! Code definitions
//!
//! A code names one protocol operation.

use std::borrow::Cow;
use std::fmt;

use super::DELIM_SECONDARY;

/// A DeviceLink code such as `"30"` (indicated airspeed) or `"64\0"`
/// (RPM of engine 0)
///
/// Base codes are compile-time constants (see [`super::codes`]); the only
/// dynamic codes are built by appending an argument with [`Code::with_arg`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// Wrap a static code string
    pub const fn new(code: &'static str) -> Self {
        Code(Cow::Borrowed(code))
    }

    /// Append an argument after the secondary delimiter (`64` + `0` -> `64\0`)
    pub fn with_arg(&self, arg: impl fmt::Display) -> Code {
        Code(Cow::Owned(format!(
            "{}{}{}",
            self.0, DELIM_SECONDARY as char, arg
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes on the wire
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Code(Cow::Owned(code))
    }
}

impl From<&'static str> for Code {
    fn from(code: &'static str) -> Self {
        Code::new(code)
    }
}
