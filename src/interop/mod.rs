//! JNI call layer
//!
//! Type-safe wrappers over the JNI primitives used to call into a JVM from
//! native code:
//! - `env`: the `JniEnv` context trait and per-context options
//! - `raw`: `JniEnv` over a live `JNIEnv*`
//! - `exception`: pending-exception check run after every foreign call
//! - `local_ref`: scoped local reference guard
//! - `marshal`: Java string <-> Rust string
//! - `lookup`: class, method and field resolution
//! - `dispatch`: compile-time choice of the typed primitive per value kind
//! - `args`: argument list packing
//! - `call`: single-call invoke, construct and field read operations

pub mod args;
pub mod call;
pub mod dispatch;
pub mod env;
pub mod exception;
pub mod local_ref;
pub mod lookup;
pub mod marshal;
pub mod mutf8;
pub mod raw;
pub mod signature;
pub mod types;

pub use args::{ArgCells, IntoArg, IntoArgs};
pub use call::{
    call_method, call_static_method, get_field, get_field_with_signature, get_static_field,
    get_static_field_with_signature, new_object,
};
pub use dispatch::{FieldType, ReturnType};
pub use env::{EnvOptions, JniEnv, TransientPolicy};
pub use exception::{check_exception, checked};
pub use local_ref::LocalRef;
pub use marshal::{foreign_to_local_string, local_to_foreign_string};
pub use raw::RawEnv;
pub use signature::{JavaType, MethodSignature, SignatureError};
pub use types::{FieldId, JClass, JObject, JString, JThrowable, MethodId, Null, Reference};

#[cfg(test)]
mod tests;
