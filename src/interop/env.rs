//! The runtime context every bridged operation runs against
//!
//! `JniEnv` mirrors the slice of the JNI function table this crate drives.
//! `RawEnv` forwards to a real `JNIEnv*`; `mock::MockVm` answers from memory.
//! Methods are the bare primitives: none of them check for pending
//! exceptions, that is the job of `check_exception`.

use super::types::{FieldId, JClass, JObject, JString, JThrowable, MethodId};
use jni_sys::jvalue;
use serde::{Deserialize, Serialize};
use std::ffi::CStr;
use std::os::raw::c_char;

/// What happens to strings the argument packer creates for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransientPolicy {
    /// Delete them as soon as the call has returned.
    #[default]
    ReleaseAfterCall,
    /// Leave them to the local frame, freed when native code returns to Java.
    FrameTeardown,
}

/// Per-context policy knobs consulted by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOptions {
    /// Print the pending throwable through `ExceptionDescribe` before clearing it.
    pub describe_faults: bool,
    pub transient_strings: TransientPolicy,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            describe_faults: true,
            transient_strings: TransientPolicy::default(),
        }
    }
}

/// Abstract JNI runtime context.
///
/// One context belongs to one attached thread; nothing here is `Send`.
pub trait JniEnv {
    /// Policy for this context.
    fn options(&self) -> EnvOptions {
        EnvOptions::default()
    }

    // ========================================================================
    // Exceptions
    // ========================================================================

    fn exception_check(&self) -> bool;

    /// New local reference to the pending throwable, null if none is pending.
    fn exception_occurred(&self) -> JThrowable;

    fn exception_describe(&self);

    fn exception_clear(&self);

    // ========================================================================
    // References
    // ========================================================================

    fn delete_local_ref(&self, obj: JObject);

    // ========================================================================
    // Reflection
    // ========================================================================

    /// `name` is a binary class name in internal form (`java/lang/String`),
    /// encoded as modified UTF-8.
    fn find_class(&self, name: &CStr) -> JClass;

    fn get_object_class(&self, obj: JObject) -> JClass;

    fn get_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId;

    fn get_static_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId;

    fn get_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId;

    fn get_static_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId;

    // ========================================================================
    // Strings
    // ========================================================================

    /// `utf` is modified UTF-8.
    fn new_string_utf(&self, utf: &CStr) -> JString;

    /// Borrow the modified UTF-8 bytes of a string; null on failure.
    fn get_string_utf_chars(&self, string: JString) -> *const c_char;

    /// # Safety
    /// `chars` must come from `get_string_utf_chars` on the same string and
    /// must not be used afterwards.
    unsafe fn release_string_utf_chars(&self, string: JString, chars: *const c_char);

    // ========================================================================
    // Objects
    // ========================================================================

    fn new_object_a(&self, class: JClass, constructor: MethodId, args: &[jvalue]) -> JObject;

    // ========================================================================
    // Instance fields
    // ========================================================================

    fn get_object_field(&self, obj: JObject, field: FieldId) -> JObject;
    fn get_boolean_field(&self, obj: JObject, field: FieldId) -> bool;
    fn get_byte_field(&self, obj: JObject, field: FieldId) -> i8;
    fn get_char_field(&self, obj: JObject, field: FieldId) -> u16;
    fn get_short_field(&self, obj: JObject, field: FieldId) -> i16;
    fn get_int_field(&self, obj: JObject, field: FieldId) -> i32;
    fn get_long_field(&self, obj: JObject, field: FieldId) -> i64;
    fn get_float_field(&self, obj: JObject, field: FieldId) -> f32;
    fn get_double_field(&self, obj: JObject, field: FieldId) -> f64;

    // ========================================================================
    // Static fields
    // ========================================================================

    fn get_static_object_field(&self, class: JClass, field: FieldId) -> JObject;
    fn get_static_boolean_field(&self, class: JClass, field: FieldId) -> bool;
    fn get_static_byte_field(&self, class: JClass, field: FieldId) -> i8;
    fn get_static_char_field(&self, class: JClass, field: FieldId) -> u16;
    fn get_static_short_field(&self, class: JClass, field: FieldId) -> i16;
    fn get_static_int_field(&self, class: JClass, field: FieldId) -> i32;
    fn get_static_long_field(&self, class: JClass, field: FieldId) -> i64;
    fn get_static_float_field(&self, class: JClass, field: FieldId) -> f32;
    fn get_static_double_field(&self, class: JClass, field: FieldId) -> f64;

    // ========================================================================
    // Instance calls, argument array
    // ========================================================================

    fn call_object_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> JObject;
    fn call_boolean_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> bool;
    fn call_byte_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> i8;
    fn call_char_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> u16;
    fn call_short_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> i16;
    fn call_int_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> i32;
    fn call_long_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> i64;
    fn call_float_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> f32;
    fn call_double_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> f64;
    fn call_void_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]);

    // ========================================================================
    // Static calls, argument array
    // ========================================================================

    fn call_static_object_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> JObject;
    fn call_static_boolean_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> bool;
    fn call_static_byte_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> i8;
    fn call_static_char_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> u16;
    fn call_static_short_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> i16;
    fn call_static_int_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> i32;
    fn call_static_long_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> i64;
    fn call_static_float_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> f32;
    fn call_static_double_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> f64;
    fn call_static_void_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]);

    // ========================================================================
    // Instance calls, no arguments
    // ========================================================================

    fn call_object_method(&self, obj: JObject, method: MethodId) -> JObject;
    fn call_boolean_method(&self, obj: JObject, method: MethodId) -> bool;
    fn call_byte_method(&self, obj: JObject, method: MethodId) -> i8;
    fn call_char_method(&self, obj: JObject, method: MethodId) -> u16;
    fn call_short_method(&self, obj: JObject, method: MethodId) -> i16;
    fn call_int_method(&self, obj: JObject, method: MethodId) -> i32;
    fn call_long_method(&self, obj: JObject, method: MethodId) -> i64;
    fn call_float_method(&self, obj: JObject, method: MethodId) -> f32;
    fn call_double_method(&self, obj: JObject, method: MethodId) -> f64;
    fn call_void_method(&self, obj: JObject, method: MethodId);

    // ========================================================================
    // Static calls, no arguments
    // ========================================================================

    fn call_static_object_method(&self, class: JClass, method: MethodId) -> JObject;
    fn call_static_boolean_method(&self, class: JClass, method: MethodId) -> bool;
    fn call_static_byte_method(&self, class: JClass, method: MethodId) -> i8;
    fn call_static_char_method(&self, class: JClass, method: MethodId) -> u16;
    fn call_static_short_method(&self, class: JClass, method: MethodId) -> i16;
    fn call_static_int_method(&self, class: JClass, method: MethodId) -> i32;
    fn call_static_long_method(&self, class: JClass, method: MethodId) -> i64;
    fn call_static_float_method(&self, class: JClass, method: MethodId) -> f32;
    fn call_static_double_method(&self, class: JClass, method: MethodId) -> f64;
    fn call_static_void_method(&self, class: JClass, method: MethodId);
}
