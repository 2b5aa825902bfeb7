//! One-call method invocation, construction and field reads
//!
//! Each operation resolves its class and member, packs the arguments,
//! dispatches on the requested Rust type and checks for a pending exception.
//! Class references resolved along the way are released on every path.

use super::args::{ArgCells, IntoArgs};
use super::dispatch::{FieldType, ReturnType};
use super::env::JniEnv;
use super::exception::checked;
use super::local_ref::LocalRef;
use super::lookup;
use super::signature::check_reference_override;
use super::types::{JObject, Reference};
use crate::errors::{JniError, MemberKind, Result};
use tracing::trace_span;

/// Call an instance method of `obj`.
///
/// ```ignore
/// let len: i32 = call_method(env, list, "size", "()I", ())?;
/// call_method::<(), _, _>(env, list, "add", "(ILjava/lang/Object;)V", (0, item))?;
/// ```
pub fn call_method<R, E, A>(env: &E, obj: JObject, name: &str, signature: &str, args: A) -> Result<R>
where
    R: ReturnType,
    E: JniEnv + ?Sized,
    A: IntoArgs,
{
    let _span = trace_span!(target: "jnicall::call", "call_method", member = name, signature).entered();

    let class = LocalRef::new(env, lookup::object_class(env, obj)?);
    let method = lookup::method_id(env, class.get(), name, signature)?;

    if A::LEN == 0 {
        return R::call_method_direct(env, obj, method);
    }
    let cells = ArgCells::pack(env, args)?;
    R::call_method(env, obj, method, cells.as_slice())
}

/// Call a static method of the class named `class_name` (internal form).
pub fn call_static_method<R, E, A>(env: &E, class_name: &str, name: &str, signature: &str, args: A) -> Result<R>
where
    R: ReturnType,
    E: JniEnv + ?Sized,
    A: IntoArgs,
{
    let _span = trace_span!(target: "jnicall::call", "call_static_method", class_name, member = name, signature).entered();

    let class = LocalRef::new(env, lookup::find_class(env, class_name)?);
    let method = lookup::static_method_id(env, class.get(), name, signature)?;

    if A::LEN == 0 {
        return R::call_static_method_direct(env, class.get(), method);
    }
    let cells = ArgCells::pack(env, args)?;
    R::call_static_method(env, class.get(), method, cells.as_slice())
}

/// Construct a new instance through the constructor with `signature`.
///
/// The caller owns the returned local reference.
pub fn new_object<E, A>(env: &E, class_name: &str, signature: &str, args: A) -> Result<JObject>
where
    E: JniEnv + ?Sized,
    A: IntoArgs,
{
    let _span = trace_span!(target: "jnicall::call", "new_object", class_name, signature).entered();

    let class = LocalRef::new(env, lookup::find_class(env, class_name)?);
    let constructor = lookup::constructor_id(env, class.get(), signature)?;

    let cells = ArgCells::pack(env, args)?;
    checked(env, |env| env.new_object_a(class.get(), constructor, cells.as_slice()))
}

/// Read an instance field whose descriptor is `T::SIGNATURE`.
pub fn get_field<T, E>(env: &E, obj: JObject, name: &str) -> Result<T>
where
    T: FieldType,
    E: JniEnv + ?Sized,
{
    let _span = trace_span!(target: "jnicall::call", "get_field", member = name, signature = T::SIGNATURE).entered();

    let class = LocalRef::new(env, lookup::object_class(env, obj)?);
    let field = lookup::field_id(env, class.get(), name, T::SIGNATURE)?;
    T::get_field(env, obj, field)
}

/// Read a reference field declared with `signature`, e.g.
/// `"Ljava/util/List;"`, as the reference kind `T`.
///
/// `signature` must be a reference descriptor, and must name exactly the
/// class of `T` when that class is final. Otherwise this fails with
/// `LookupFailed` without touching the JVM.
pub fn get_field_with_signature<T, E>(env: &E, obj: JObject, name: &str, signature: &str) -> Result<T>
where
    T: Reference,
    E: JniEnv + ?Sized,
{
    let _span = trace_span!(target: "jnicall::call", "get_field", member = name, signature).entered();

    reject_bad_override::<T>(MemberKind::Field, name, signature)?;
    let class = LocalRef::new(env, lookup::object_class(env, obj)?);
    let field = lookup::field_id(env, class.get(), name, signature)?;
    JObject::get_field(env, obj, field).map(T::from_object)
}

/// Read a static field whose descriptor is `T::SIGNATURE`.
pub fn get_static_field<T, E>(env: &E, class_name: &str, name: &str) -> Result<T>
where
    T: FieldType,
    E: JniEnv + ?Sized,
{
    let _span = trace_span!(target: "jnicall::call", "get_static_field", class_name, member = name, signature = T::SIGNATURE)
        .entered();

    let class = LocalRef::new(env, lookup::find_class(env, class_name)?);
    let field = lookup::static_field_id(env, class.get(), name, T::SIGNATURE)?;
    T::get_static_field(env, class.get(), field)
}

/// Static counterpart of `get_field_with_signature`.
pub fn get_static_field_with_signature<T, E>(env: &E, class_name: &str, name: &str, signature: &str) -> Result<T>
where
    T: Reference,
    E: JniEnv + ?Sized,
{
    let _span = trace_span!(target: "jnicall::call", "get_static_field", class_name, member = name, signature).entered();

    reject_bad_override::<T>(MemberKind::StaticField, name, signature)?;
    let class = LocalRef::new(env, lookup::find_class(env, class_name)?);
    let field = lookup::static_field_id(env, class.get(), name, signature)?;
    JObject::get_static_field(env, class.get(), field).map(T::from_object)
}

fn reject_bad_override<T: Reference>(member: MemberKind, name: &str, signature: &str) -> Result<()> {
    check_reference_override::<T>(signature)
        .map(drop)
        .map_err(|_| JniError::lookup_failed(member, name, Some(signature)))
}
