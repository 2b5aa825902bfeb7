//! Exception bridge
//!
//! The one post-call routine run after every foreign call site.

use super::env::JniEnv;
use crate::errors::{JniError, Result};
use crate::logging::log_foreign_fault;

/// Turn a pending Java exception into `JniError::ForeignFault`.
///
/// Takes the throwable, optionally dumps it through `ExceptionDescribe`, and
/// clears the pending state before returning. Does nothing when no exception
/// is pending.
pub fn check_exception<E: JniEnv + ?Sized>(env: &E) -> Result<()> {
    if !env.exception_check() {
        return Ok(());
    }

    let exception = env.exception_occurred();
    if env.options().describe_faults {
        env.exception_describe();
    }
    env.exception_clear();

    log_foreign_fault(exception);
    Err(JniError::foreign_fault(exception))
}

/// Run one foreign call, then `check_exception`.
#[inline]
pub fn checked<E, T, F>(env: &E, call: F) -> Result<T>
where
    E: JniEnv + ?Sized,
    F: FnOnce(&E) -> T,
{
    let value = call(env);
    check_exception(env)?;
    Ok(value)
}
