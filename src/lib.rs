//! jnicall - type-safe calls from native code into the JVM
//!
//! Wraps the JNI function table with single-call helpers that resolve,
//! pack, dispatch and check for exceptions:
//!
//! ```ignore
//! use jnicall::prelude::*;
//!
//! let env = unsafe { RawEnv::from_raw(raw_env) }.ok_or("null env")?;
//! let text: JString = call_static_method(&env, "java/lang/String", "valueOf", "(I)Ljava/lang/String;", (42,))?;
//! let text = LocalRef::new(&env, text);
//! println!("{}", foreign_to_local_string(&env, text.get()));
//! ```

pub mod config;
pub mod errors;
pub mod interop;
pub mod logging;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::{Config, ConfigError};
pub use errors::{JniError, MemberKind, Result};

/// Everything a bridge module usually needs
pub mod prelude {
    pub use crate::errors::{JniError, MemberKind, Result};
    pub use crate::interop::{
        call_method, call_static_method, check_exception, foreign_to_local_string, get_field,
        get_field_with_signature, get_static_field, get_static_field_with_signature, local_to_foreign_string,
        new_object, EnvOptions, FieldType, JClass, JObject, JString, JThrowable, JniEnv, LocalRef, Null, RawEnv,
        Reference, ReturnType, TransientPolicy,
    };
}

/// Install logging as described by `config`.
///
/// Keep the returned guard alive for as long as the library is loaded.
pub fn init(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    logging::init_logging(&config.log_config())
}
