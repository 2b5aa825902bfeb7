//! Reflective lookup of classes, methods and fields
//!
//! Every resolution is one foreign call plus `check_exception`. A fault raised
//! while resolving (`NoClassDefFoundError`, `NoSuchMethodError`, ...) comes
//! back as `JniError::LookupFailed` with the throwable attached. Nothing is
//! cached; each call asks the JVM again.

use super::env::JniEnv;
use super::exception::checked;
use super::mutf8;
use super::types::{FieldId, JClass, JObject, MethodId};
use crate::errors::{JniError, MemberKind, Result};
use crate::logging::log_lookup;

/// Reserved method name of constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

trait Resolved: Copy {
    fn unresolved(&self) -> bool;
}

impl Resolved for JClass {
    fn unresolved(&self) -> bool {
        self.is_null()
    }
}

impl Resolved for MethodId {
    fn unresolved(&self) -> bool {
        self.is_null()
    }
}

impl Resolved for FieldId {
    fn unresolved(&self) -> bool {
        self.is_null()
    }
}

fn resolve<E, H, F>(env: &E, member: MemberKind, name: &str, signature: Option<&str>, query: F) -> Result<H>
where
    E: JniEnv + ?Sized,
    H: Resolved,
    F: FnOnce(&E) -> H,
{
    log_lookup(&member.to_string(), name, signature);

    let handle = checked(env, query).map_err(|err| err.into_lookup(member, name, signature))?;
    if handle.unresolved() {
        return Err(JniError::lookup_failed(member, name, signature));
    }
    Ok(handle)
}

/// Resolve a class by its internal name (`java/util/ArrayList`).
///
/// The caller owns the returned local reference.
pub fn find_class<E: JniEnv + ?Sized>(env: &E, name: &str) -> Result<JClass> {
    let class_name = mutf8::encode(name);
    resolve(env, MemberKind::Class, name, None, |env| env.find_class(&class_name))
}

/// The runtime class of `obj`. Fails for a null receiver.
///
/// The caller owns the returned local reference.
pub fn object_class<E: JniEnv + ?Sized>(env: &E, obj: JObject) -> Result<JClass> {
    if obj.is_null() {
        return Err(JniError::lookup_failed(MemberKind::Class, "<null receiver>", None));
    }
    resolve(env, MemberKind::Class, "<receiver class>", None, |env| env.get_object_class(obj))
}

pub fn method_id<E: JniEnv + ?Sized>(env: &E, class: JClass, name: &str, signature: &str) -> Result<MethodId> {
    let (c_name, c_sig) = (mutf8::encode(name), mutf8::encode(signature));
    resolve(env, MemberKind::Method, name, Some(signature), |env| {
        env.get_method_id(class, &c_name, &c_sig)
    })
}

pub fn static_method_id<E: JniEnv + ?Sized>(
    env: &E,
    class: JClass,
    name: &str,
    signature: &str,
) -> Result<MethodId> {
    let (c_name, c_sig) = (mutf8::encode(name), mutf8::encode(signature));
    resolve(env, MemberKind::StaticMethod, name, Some(signature), |env| {
        env.get_static_method_id(class, &c_name, &c_sig)
    })
}

/// Resolve the constructor with `signature`, e.g. `"(I)V"`.
pub fn constructor_id<E: JniEnv + ?Sized>(env: &E, class: JClass, signature: &str) -> Result<MethodId> {
    let (c_name, c_sig) = (mutf8::encode(CONSTRUCTOR_NAME), mutf8::encode(signature));
    resolve(env, MemberKind::Constructor, CONSTRUCTOR_NAME, Some(signature), |env| {
        env.get_method_id(class, &c_name, &c_sig)
    })
}

pub fn field_id<E: JniEnv + ?Sized>(env: &E, class: JClass, name: &str, signature: &str) -> Result<FieldId> {
    let (c_name, c_sig) = (mutf8::encode(name), mutf8::encode(signature));
    resolve(env, MemberKind::Field, name, Some(signature), |env| {
        env.get_field_id(class, &c_name, &c_sig)
    })
}

pub fn static_field_id<E: JniEnv + ?Sized>(
    env: &E,
    class: JClass,
    name: &str,
    signature: &str,
) -> Result<FieldId> {
    let (c_name, c_sig) = (mutf8::encode(name), mutf8::encode(signature));
    resolve(env, MemberKind::StaticField, name, Some(signature), |env| {
        env.get_static_field_id(class, &c_name, &c_sig)
    })
}
