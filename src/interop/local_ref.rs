//! Scoped ownership of one local reference

use super::env::JniEnv;
use super::types::{JObject, Reference};
use crate::logging::log_reference_release;
use std::fmt;

/// Owns a local reference and deletes it when dropped.
///
/// A null handle is never deleted. `release` hands the reference back to the
/// caller and leaves the guard empty.
pub struct LocalRef<'env, E: JniEnv + ?Sized, T: Reference = JObject> {
    env: &'env E,
    handle: T,
}

impl<'env, E: JniEnv + ?Sized, T: Reference> LocalRef<'env, E, T> {
    /// Take ownership of `handle`, which must be a local reference of `env`
    /// (or null).
    #[inline]
    pub fn new(env: &'env E, handle: T) -> Self {
        Self { env, handle }
    }

    /// The guarded handle. Ownership stays with the guard.
    #[inline]
    pub fn get(&self) -> T {
        self.handle
    }

    /// Give up ownership; the guard will not delete anything afterwards.
    #[inline]
    pub fn release(&mut self) -> T {
        std::mem::replace(&mut self.handle, T::NULL)
    }

    /// Consume the guard without deleting the reference.
    #[inline]
    pub fn into_inner(mut self) -> T {
        self.release()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    #[inline]
    pub fn env(&self) -> &'env E {
        self.env
    }
}

impl<E: JniEnv + ?Sized, T: Reference> Drop for LocalRef<'_, E, T> {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        let obj = self.release().as_object();
        self.env.delete_local_ref(obj);
        log_reference_release(obj);
    }
}

impl<E: JniEnv + ?Sized, T: Reference + fmt::Debug> fmt::Debug for LocalRef<'_, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalRef").field(&self.handle).finish()
    }
}
