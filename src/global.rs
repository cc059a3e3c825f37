//! Process-wide default [`Registry`], for applications that need only one.
//!
//! Register every sentinel during start-up, before any thread starts calling
//! [`encode`] or [`decode`]. After that the registry is only read.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::SharedError;
use crate::code::Code;
use crate::error::Error;
use crate::registry::Registry;

static DEFAULT_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

// Registry methods never leave it half-written, so a poisoned lock still
// guards a consistent registry.
fn read() -> RwLockReadGuard<'static, Registry> {
    DEFAULT_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}

/// [`Registry::register`] on the default registry.
pub fn register(code: Code, err: SharedError) -> Result<(), Error> {
    write().register(code, err)
}

/// [`Registry::must_register`] on the default registry.
#[expect(
    clippy::panic,
    reason = "a duplicate code at start-up is a configuration bug"
)]
pub fn must_register(code: Code, err: SharedError) {
    // Released before panicking so the lock is not poisoned.
    let result = write().register(code, err);
    if let Err(e) = result {
        panic!("{e}");
    }
}

/// [`Registry::encode`] on the default registry.
pub fn encode(err: SharedError) -> SharedError {
    read().encode(err)
}

/// [`Registry::decode`] on the default registry.
pub fn decode(err: Option<SharedError>) -> Option<SharedError> {
    read().decode(err)
}

/// Runs `f` with shared access to the default registry.
pub fn with_default<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&read())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use std::sync::Arc;

    use super::{decode, encode, register, with_default};
    use crate::SharedError;
    use crate::code::Code;
    use crate::error::Error;

    // The default registry is shared by every test in this binary; each test
    // owns a distinct code.

    #[derive(thiserror::Error, Debug)]
    #[error("{0}")]
    struct Sentinel(&'static str);

    #[test]
    fn default_registry_round_trips() {
        let err: SharedError = Arc::new(Sentinel("quota exhausted"));
        register(Code::ResourceExhausted, err.clone()).unwrap();

        let decoded = decode(Some(encode(err.clone()))).unwrap();
        assert!(Arc::ptr_eq(&decoded, &err));
        assert_eq!(
            with_default(|registry| registry.code_of(&err)),
            Some(Code::ResourceExhausted)
        );
    }

    #[test]
    fn default_registry_rejects_duplicates() {
        let first: SharedError = Arc::new(Sentinel("first"));
        register(Code::PermissionDenied, first.clone()).unwrap();
        assert!(matches!(
            register(Code::PermissionDenied, Arc::new(Sentinel("second"))),
            Err(Error::DuplicateCode { .. })
        ));
        let kept = with_default(|registry| registry.lookup(Code::PermissionDenied).cloned());
        assert!(Arc::ptr_eq(&kept.unwrap(), &first));
    }
}
