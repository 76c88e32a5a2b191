//! EventName — the validated topic a bridge listens on.

use std::fmt;

use crate::error::{Result, RxError};

/// A non-empty event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(String);

impl EventName {
    /// Validate and wrap `name`.
    ///
    /// Returns [`RxError::InvalidEventName`] for an empty string.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(RxError::InvalidEventName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for EventName {
    type Error = RxError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for EventName {
    type Error = RxError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}
