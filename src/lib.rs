#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

//! Carry sentinel error identity across transports that only transmit a
//! status code and a message.
//!
//! ```
//! use std::sync::Arc;
//!
//! use status_errors::{Code, Registry, SharedError};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("user not found")]
//! struct UserNotFound;
//!
//! let user_not_found: SharedError = Arc::new(UserNotFound);
//! let mut registry = Registry::new();
//! registry.register(Code::NotFound, user_not_found.clone())?;
//!
//! // server side, before handing the error to the transport
//! let on_the_wire = registry.encode(user_not_found.clone());
//! // client side, after the call failed
//! let received = registry.decode(Some(on_the_wire));
//! assert!(received.is_some_and(|err| Arc::ptr_eq(&err, &user_not_found)));
//! # Ok::<(), status_errors::Error>(())
//! ```

pub mod code;
pub mod error;
pub mod global;
pub mod registry;
pub mod wire;

use std::sync::Arc;

/// A shareable error value whose identity is the `Arc` allocation.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

pub use code::{Code, StatusCode};
pub use error::Error;
pub use global::{
    decode as decode_default, encode as encode_default, must_register as must_register_default,
    register as register_default,
};
pub use registry::Registry;
pub use wire::{WireError, from_raw_status};
