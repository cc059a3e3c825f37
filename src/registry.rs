use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::SharedError;
use crate::code::{Code, StatusCode};
use crate::error::Error;
use crate::wire::WireError;

/// Associates status codes with sentinel errors so that a sentinel survives a
/// trip through a transport that only carries `(code, message)`.
///
/// Populate it during start-up, then share it read-only. Identity is pointer
/// identity of the `Arc`: two sentinels with the same message are different
/// errors.
#[derive(Debug)]
pub struct Registry<C = Code> {
    entries: Vec<(C, SharedError)>,
    by_code: HashMap<C, usize>,
}

impl<C: StatusCode> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StatusCode> Registry<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    /// Registers every pair in order, stopping at the first duplicate code.
    pub fn from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (C, SharedError)>,
    {
        let mut registry = Self::new();
        for (code, err) in entries {
            registry.register(code, err)?;
        }
        Ok(registry)
    }

    /// Associates `code` with `err`.
    ///
    /// A code can be registered once. A second call with the same code fails
    /// even if `err` is the same sentinel, and leaves the registry untouched.
    pub fn register(&mut self, code: C, err: SharedError) -> Result<(), Error> {
        match self.by_code.entry(code) {
            Entry::Occupied(_) => {
                warn!(%code, error = %err, "status code already registered");
                Err(Error::DuplicateCode {
                    code: code.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                debug!(%code, error = %err, "registered status code");
                self.entries.push((code, err));
                Ok(())
            }
        }
    }

    /// Like [`register`](Self::register), but a duplicate code aborts.
    ///
    /// Meant for start-up code whose codes are known to be distinct.
    #[expect(
        clippy::panic,
        reason = "a duplicate code at start-up is a configuration bug"
    )]
    pub fn must_register(&mut self, code: C, err: SharedError) {
        if let Err(e) = self.register(code, err) {
            panic!("{e}");
        }
    }

    /// Converts a registered sentinel into a [`WireError`] carrying its code
    /// and message. Anything else is returned as is.
    pub fn encode(&self, err: SharedError) -> SharedError {
        match self.code_of(&err) {
            Some(code) => {
                trace!(%code, "encoding registered error");
                Arc::new(WireError::new(code, err.to_string()))
            }
            None => {
                trace!(error = %err, "error not registered, passing through");
                err
            }
        }
    }

    /// Recovers the registered sentinel from a [`WireError`].
    ///
    /// `None` stays `None`. Errors that are not a `WireError<C>`, and wire
    /// errors whose code was never registered, are returned unchanged.
    pub fn decode(&self, err: Option<SharedError>) -> Option<SharedError> {
        let err = err?;
        let registered = err
            .downcast_ref::<WireError<C>>()
            .and_then(|wire| self.decode_wire(wire));
        match registered {
            Some(sentinel) => Some(sentinel),
            None => {
                trace!(error = %err, "no registered error, passing through");
                Some(err)
            }
        }
    }

    /// The sentinel registered under the wire error's code, if any.
    pub fn decode_wire(&self, wire: &WireError<C>) -> Option<SharedError> {
        let sentinel = self.lookup(wire.code).cloned();
        if sentinel.is_some() {
            trace!(code = %wire.code, "decoded registered error");
        }
        sentinel
    }

    pub fn lookup(&self, code: C) -> Option<&SharedError> {
        self.by_code
            .get(&code)
            .and_then(|&idx| self.entries.get(idx))
            .map(|(_, err)| err)
    }

    /// First code `err` was registered under, by pointer identity.
    pub fn code_of(&self, err: &SharedError) -> Option<C> {
        self.entries
            .iter()
            .find(|(_, registered)| Arc::ptr_eq(registered, err))
            .map(|(code, _)| *code)
    }

    /// Registered codes in registration order.
    pub fn codes(&self) -> impl Iterator<Item = C> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
