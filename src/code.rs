use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Bound for any status-code domain a [`Registry`](crate::Registry) can be keyed by.
///
/// Blanket-implemented; applications whose transport defines its own code
/// enumeration only need the usual derives on it.
pub trait StatusCode:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<T> StatusCode for T where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// Canonical RPC status codes, numbered as on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Code {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Code {
    /// `None` for values outside the enumeration. They are never folded
    /// into [`Code::Unknown`], which a registry may have a sentinel under.
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> Self {
        code.as_i32()
    }
}
