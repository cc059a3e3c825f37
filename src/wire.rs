use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::SharedError;
use crate::code::Code;

/// The part of an error that survives a status-code transport: a code and
/// the message text.
///
/// `Display` prints the message only, so a client that never decodes still
/// sees the server's original text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct WireError<C = Code> {
    pub code: C,
    pub message: String,
}

impl<C> WireError<C> {
    pub fn new(code: C, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl WireError<Code> {
    /// Build from the raw `(code, message)` pair a transport hands back.
    /// `None` if `code` is not a known [`Code`].
    pub fn from_raw(code: i32, message: impl Into<String>) -> Option<Self> {
        Code::from_i32(code).map(|code| Self::new(code, message))
    }
}

/// Turns a raw `(code, message)` pair into an error a
/// [`Registry`](crate::Registry) can decode.
///
/// A code outside [`Code`] keeps its raw value as a `WireError<i32>`: the
/// message survives, and no `Registry<Code>` will match it to a sentinel.
pub fn from_raw_status(code: i32, message: impl Into<String>) -> SharedError {
    let message = message.into();
    match Code::from_i32(code) {
        Some(known) => Arc::new(WireError::new(known, message)),
        None => {
            trace!(code, "status code outside the canonical set");
            Arc::new(WireError::new(code, message))
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::{WireError, from_raw_status};
    use crate::code::Code;

    #[test]
    fn display_is_message_only() {
        let wire = WireError::new(Code::NotFound, "no such user");
        assert_eq!(wire.to_string(), "no such user");
    }

    #[test]
    fn from_raw_resolves_known_codes_only() {
        assert_eq!(WireError::from_raw(5, "x").unwrap().code, Code::NotFound);
        assert_eq!(WireError::from_raw(2, "x").unwrap().code, Code::Unknown);
        assert!(WireError::from_raw(99, "x").is_none());
    }

    #[test]
    fn raw_status_keeps_unmapped_code() {
        let known = from_raw_status(5, "gone");
        assert_eq!(
            known.downcast_ref::<WireError>(),
            Some(&WireError::new(Code::NotFound, "gone"))
        );

        let unmapped = from_raw_status(99, "from a newer server");
        assert!(unmapped.downcast_ref::<WireError>().is_none());
        assert_eq!(
            unmapped.downcast_ref::<WireError<i32>>(),
            Some(&WireError::new(99, "from a newer server"))
        );
        assert_eq!(unmapped.to_string(), "from a newer server");
    }
}
