//! `JniEnv` over a live `JNIEnv*`
//!
//! Each method is a single forward through the JNI function table.

use super::env::{EnvOptions, JniEnv};
use super::types::{FieldId, JClass, JObject, JString, JThrowable, MethodId};
use core::marker::PhantomData;
use core::ptr;
use jni_sys::{jvalue, JNI_FALSE};
use std::ffi::CStr;
use std::os::raw::c_char;

/// Borrowed JNI environment of the current thread.
///
/// The lifetime ties the wrapper to the native frame the pointer was handed
/// to; the raw pointer keeps it `!Send`.
pub struct RawEnv<'frame> {
    raw: *mut jni_sys::JNIEnv,
    options: EnvOptions,
    _frame: PhantomData<&'frame mut jni_sys::JNIEnv>,
}

impl<'frame> RawEnv<'frame> {
    /// Wrap the env pointer passed to a native method.
    ///
    /// Returns `None` for a null env or a null function table.
    ///
    /// # Safety
    /// `raw` must be the `JNIEnv*` of the calling thread and stay valid for
    /// `'frame`.
    pub unsafe fn from_raw(raw: *mut jni_sys::JNIEnv) -> Option<Self> {
        if raw.is_null() || (*raw).is_null() {
            return None;
        }
        Some(Self {
            raw,
            options: EnvOptions::default(),
            _frame: PhantomData,
        })
    }

    pub fn with_options(mut self, options: EnvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn as_raw(&self) -> *mut jni_sys::JNIEnv {
        self.raw
    }
}

impl core::fmt::Debug for RawEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawEnv")
            .field("raw", &self.raw)
            .field("options", &self.options)
            .finish()
    }
}

#[cold]
#[inline(never)]
fn missing_slot(slot: &'static str) -> ! {
    panic!("JNI function table has no entry for {}", slot)
}

/// Call a function-table slot with the env pointer prepended.
macro_rules! jni {
    ($env:expr, $slot:ident $(, $arg:expr)* $(,)?) => {{
        let raw = $env.raw;
        match (**raw).$slot {
            Some(func) => func(raw $(, $arg)*),
            None => missing_slot(stringify!($slot)),
        }
    }};
}

/// Forward the six typed primitives of one value kind.
macro_rules! forward_kind {
    (
        $ty:ty, $wrap:expr;
        $get:ident = $Get:ident,
        $get_static:ident = $GetStatic:ident,
        $call_a:ident = $CallA:ident,
        $call_static_a:ident = $CallStaticA:ident,
        $call:ident = $Call:ident,
        $call_static:ident = $CallStatic:ident
    ) => {
        fn $get(&self, obj: JObject, field: FieldId) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $Get, obj.as_raw(), field.as_raw()) })
        }

        fn $get_static(&self, class: JClass, field: FieldId) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $GetStatic, class.as_raw(), field.as_raw()) })
        }

        fn $call_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $CallA, obj.as_raw(), method.as_raw(), args.as_ptr()) })
        }

        fn $call_static_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $CallStaticA, class.as_raw(), method.as_raw(), args.as_ptr()) })
        }

        fn $call(&self, obj: JObject, method: MethodId) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $Call, obj.as_raw(), method.as_raw()) })
        }

        fn $call_static(&self, class: JClass, method: MethodId) -> $ty {
            let wrap = $wrap;
            wrap(unsafe { jni!(self, $CallStatic, class.as_raw(), method.as_raw()) })
        }
    };
}

fn same<T>(value: T) -> T {
    value
}

fn truthy(value: jni_sys::jboolean) -> bool {
    value != JNI_FALSE
}

fn object(raw: jni_sys::jobject) -> JObject {
    // SAFETY: the JVM only hands out null or live local references.
    unsafe { JObject::from_raw(raw) }
}

impl JniEnv for RawEnv<'_> {
    fn options(&self) -> EnvOptions {
        self.options
    }

    fn exception_check(&self) -> bool {
        truthy(unsafe { jni!(self, ExceptionCheck) })
    }

    fn exception_occurred(&self) -> JThrowable {
        unsafe { JThrowable::from_raw(jni!(self, ExceptionOccurred)) }
    }

    fn exception_describe(&self) {
        unsafe { jni!(self, ExceptionDescribe) }
    }

    fn exception_clear(&self) {
        unsafe { jni!(self, ExceptionClear) }
    }

    fn delete_local_ref(&self, obj: JObject) {
        unsafe { jni!(self, DeleteLocalRef, obj.as_raw()) }
    }

    fn find_class(&self, name: &CStr) -> JClass {
        unsafe { JClass::from_raw(jni!(self, FindClass, name.as_ptr())) }
    }

    fn get_object_class(&self, obj: JObject) -> JClass {
        unsafe { JClass::from_raw(jni!(self, GetObjectClass, obj.as_raw())) }
    }

    fn get_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId {
        unsafe {
            MethodId::from_raw(jni!(self, GetMethodID, class.as_raw(), name.as_ptr(), signature.as_ptr()))
        }
    }

    fn get_static_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId {
        unsafe {
            MethodId::from_raw(jni!(
                self,
                GetStaticMethodID,
                class.as_raw(),
                name.as_ptr(),
                signature.as_ptr()
            ))
        }
    }

    fn get_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId {
        unsafe { FieldId::from_raw(jni!(self, GetFieldID, class.as_raw(), name.as_ptr(), signature.as_ptr())) }
    }

    fn get_static_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId {
        unsafe {
            FieldId::from_raw(jni!(
                self,
                GetStaticFieldID,
                class.as_raw(),
                name.as_ptr(),
                signature.as_ptr()
            ))
        }
    }

    fn new_string_utf(&self, utf: &CStr) -> JString {
        unsafe { JString::from_raw(jni!(self, NewStringUTF, utf.as_ptr())) }
    }

    fn get_string_utf_chars(&self, string: JString) -> *const c_char {
        unsafe { jni!(self, GetStringUTFChars, string.as_raw(), ptr::null_mut()) }
    }

    unsafe fn release_string_utf_chars(&self, string: JString, chars: *const c_char) {
        jni!(self, ReleaseStringUTFChars, string.as_raw(), chars)
    }

    fn new_object_a(&self, class: JClass, constructor: MethodId, args: &[jvalue]) -> JObject {
        object(unsafe { jni!(self, NewObjectA, class.as_raw(), constructor.as_raw(), args.as_ptr()) })
    }

    forward_kind! {
        JObject, object;
        get_object_field = GetObjectField,
        get_static_object_field = GetStaticObjectField,
        call_object_method_a = CallObjectMethodA,
        call_static_object_method_a = CallStaticObjectMethodA,
        call_object_method = CallObjectMethod,
        call_static_object_method = CallStaticObjectMethod
    }

    forward_kind! {
        bool, truthy;
        get_boolean_field = GetBooleanField,
        get_static_boolean_field = GetStaticBooleanField,
        call_boolean_method_a = CallBooleanMethodA,
        call_static_boolean_method_a = CallStaticBooleanMethodA,
        call_boolean_method = CallBooleanMethod,
        call_static_boolean_method = CallStaticBooleanMethod
    }

    forward_kind! {
        i8, same;
        get_byte_field = GetByteField,
        get_static_byte_field = GetStaticByteField,
        call_byte_method_a = CallByteMethodA,
        call_static_byte_method_a = CallStaticByteMethodA,
        call_byte_method = CallByteMethod,
        call_static_byte_method = CallStaticByteMethod
    }

    forward_kind! {
        u16, same;
        get_char_field = GetCharField,
        get_static_char_field = GetStaticCharField,
        call_char_method_a = CallCharMethodA,
        call_static_char_method_a = CallStaticCharMethodA,
        call_char_method = CallCharMethod,
        call_static_char_method = CallStaticCharMethod
    }

    forward_kind! {
        i16, same;
        get_short_field = GetShortField,
        get_static_short_field = GetStaticShortField,
        call_short_method_a = CallShortMethodA,
        call_static_short_method_a = CallStaticShortMethodA,
        call_short_method = CallShortMethod,
        call_static_short_method = CallStaticShortMethod
    }

    forward_kind! {
        i32, same;
        get_int_field = GetIntField,
        get_static_int_field = GetStaticIntField,
        call_int_method_a = CallIntMethodA,
        call_static_int_method_a = CallStaticIntMethodA,
        call_int_method = CallIntMethod,
        call_static_int_method = CallStaticIntMethod
    }

    forward_kind! {
        i64, same;
        get_long_field = GetLongField,
        get_static_long_field = GetStaticLongField,
        call_long_method_a = CallLongMethodA,
        call_static_long_method_a = CallStaticLongMethodA,
        call_long_method = CallLongMethod,
        call_static_long_method = CallStaticLongMethod
    }

    forward_kind! {
        f32, same;
        get_float_field = GetFloatField,
        get_static_float_field = GetStaticFloatField,
        call_float_method_a = CallFloatMethodA,
        call_static_float_method_a = CallStaticFloatMethodA,
        call_float_method = CallFloatMethod,
        call_static_float_method = CallStaticFloatMethod
    }

    forward_kind! {
        f64, same;
        get_double_field = GetDoubleField,
        get_static_double_field = GetStaticDoubleField,
        call_double_method_a = CallDoubleMethodA,
        call_static_double_method_a = CallStaticDoubleMethodA,
        call_double_method = CallDoubleMethod,
        call_static_double_method = CallStaticDoubleMethod
    }

    fn call_void_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) {
        unsafe { jni!(self, CallVoidMethodA, obj.as_raw(), method.as_raw(), args.as_ptr()) }
    }

    fn call_static_void_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) {
        unsafe { jni!(self, CallStaticVoidMethodA, class.as_raw(), method.as_raw(), args.as_ptr()) }
    }

    fn call_void_method(&self, obj: JObject, method: MethodId) {
        unsafe { jni!(self, CallVoidMethod, obj.as_raw(), method.as_raw()) }
    }

    fn call_static_void_method(&self, class: JClass, method: MethodId) {
        unsafe { jni!(self, CallStaticVoidMethod, class.as_raw(), method.as_raw()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jni_sys::{jboolean, jclass, jint, jobject, JNINativeInterface_, JNI_TRUE};

    unsafe extern "system" fn exception_check(_env: *mut jni_sys::JNIEnv) -> jboolean {
        JNI_TRUE
    }

    unsafe extern "system" fn find_class(_env: *mut jni_sys::JNIEnv, name: *const c_char) -> jclass {
        let len = CStr::from_ptr(name).to_bytes().len();
        len as jobject
    }

    unsafe extern "system" fn get_int_field(
        _env: *mut jni_sys::JNIEnv,
        obj: jobject,
        _field: jni_sys::jfieldID,
    ) -> jint {
        obj as usize as jint * 2
    }

    fn table() -> JNINativeInterface_ {
        // SAFETY: every slot is a nullable pointer or an `Option` of a function
        // pointer, all-zero is a valid "empty" table.
        let mut table: JNINativeInterface_ = unsafe { std::mem::zeroed() };
        table.ExceptionCheck = Some(exception_check);
        table.FindClass = Some(find_class);
        table.GetIntField = Some(get_int_field);
        table
    }

    #[test]
    fn test_null_env_is_rejected() {
        assert!(unsafe { RawEnv::from_raw(ptr::null_mut()) }.is_none());

        let mut empty: jni_sys::JNIEnv = ptr::null();
        assert!(unsafe { RawEnv::from_raw(&mut empty) }.is_none());
    }

    #[test]
    fn test_forwards_through_function_table() {
        let table = table();
        let mut interface: jni_sys::JNIEnv = &table;
        let env = unsafe { RawEnv::from_raw(&mut interface) }.expect("non-null env");

        assert!(env.exception_check());

        let name = CStr::from_bytes_with_nul(b"java/lang/String\0").expect("nul-terminated");
        let class = env.find_class(name);
        assert_eq!(class.as_raw() as usize, "java/lang/String".len());

        let obj = unsafe { JObject::from_raw(21 as jobject) };
        assert_eq!(env.get_int_field(obj, FieldId::null()), 42);
    }

    #[test]
    #[should_panic(expected = "ExceptionClear")]
    fn test_empty_slot_panics_with_slot_name() {
        let table = table();
        let mut interface: jni_sys::JNIEnv = &table;
        let env = unsafe { RawEnv::from_raw(&mut interface) }.expect("non-null env");
        env.exception_clear();
    }

    #[test]
    fn test_options_travel_with_env() {
        let table = table();
        let mut interface: jni_sys::JNIEnv = &table;
        let options = EnvOptions {
            describe_faults: false,
            ..EnvOptions::default()
        };
        let env = unsafe { RawEnv::from_raw(&mut interface) }
            .expect("non-null env")
            .with_options(options);
        assert_eq!(env.options(), options);
    }
}
