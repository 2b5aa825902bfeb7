//! Compile-time selection of the typed JNI primitive for a value kind
//!
//! `ReturnType` covers everything a method can return, `()` included.
//! `FieldType` adds the two field readers and excludes `()`. Each slot is one
//! foreign call followed by `check_exception`. Using a type with no impl
//! here is a compile error.

use super::env::JniEnv;
use super::exception::checked;
use super::types::{FieldId, JClass, JObject, JString, JThrowable, MethodId, Reference};
use crate::errors::Result;
use jni_sys::jvalue;

/// A type a Java method can return.
pub trait ReturnType: Sized {
    /// Descriptor of the Java type, `V` for `()`.
    const SIGNATURE: &'static str;

    fn call_method<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId, args: &[jvalue]) -> Result<Self>;

    fn call_static_method<E: JniEnv + ?Sized>(
        env: &E,
        class: JClass,
        method: MethodId,
        args: &[jvalue],
    ) -> Result<Self>;

    /// Zero-argument call without an argument array.
    fn call_method_direct<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId) -> Result<Self>;

    /// Zero-argument static call without an argument array.
    fn call_static_method_direct<E: JniEnv + ?Sized>(env: &E, class: JClass, method: MethodId) -> Result<Self>;
}

/// A type a Java field can hold.
pub trait FieldType: ReturnType {
    fn get_field<E: JniEnv + ?Sized>(env: &E, obj: JObject, field: FieldId) -> Result<Self>;

    fn get_static_field<E: JniEnv + ?Sized>(env: &E, class: JClass, field: FieldId) -> Result<Self>;
}

macro_rules! primitive_dispatch {
    ($ty:ty, $sig:literal, $get:ident, $get_static:ident, $call_a:ident, $call_static_a:ident, $call:ident, $call_static:ident) => {
        impl ReturnType for $ty {
            const SIGNATURE: &'static str = $sig;

            #[inline]
            fn call_method<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId, args: &[jvalue]) -> Result<Self> {
                checked(env, |env| env.$call_a(obj, method, args))
            }

            #[inline]
            fn call_static_method<E: JniEnv + ?Sized>(
                env: &E,
                class: JClass,
                method: MethodId,
                args: &[jvalue],
            ) -> Result<Self> {
                checked(env, |env| env.$call_static_a(class, method, args))
            }

            #[inline]
            fn call_method_direct<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId) -> Result<Self> {
                checked(env, |env| env.$call(obj, method))
            }

            #[inline]
            fn call_static_method_direct<E: JniEnv + ?Sized>(env: &E, class: JClass, method: MethodId) -> Result<Self> {
                checked(env, |env| env.$call_static(class, method))
            }
        }

        impl FieldType for $ty {
            #[inline]
            fn get_field<E: JniEnv + ?Sized>(env: &E, obj: JObject, field: FieldId) -> Result<Self> {
                checked(env, |env| env.$get(obj, field))
            }

            #[inline]
            fn get_static_field<E: JniEnv + ?Sized>(env: &E, class: JClass, field: FieldId) -> Result<Self> {
                checked(env, |env| env.$get_static(class, field))
            }
        }
    };
}

primitive_dispatch!(bool, "Z", get_boolean_field, get_static_boolean_field, call_boolean_method_a, call_static_boolean_method_a, call_boolean_method, call_static_boolean_method);
primitive_dispatch!(i8, "B", get_byte_field, get_static_byte_field, call_byte_method_a, call_static_byte_method_a, call_byte_method, call_static_byte_method);
primitive_dispatch!(u16, "C", get_char_field, get_static_char_field, call_char_method_a, call_static_char_method_a, call_char_method, call_static_char_method);
primitive_dispatch!(i16, "S", get_short_field, get_static_short_field, call_short_method_a, call_static_short_method_a, call_short_method, call_static_short_method);
primitive_dispatch!(i32, "I", get_int_field, get_static_int_field, call_int_method_a, call_static_int_method_a, call_int_method, call_static_int_method);
primitive_dispatch!(i64, "J", get_long_field, get_static_long_field, call_long_method_a, call_static_long_method_a, call_long_method, call_static_long_method);
primitive_dispatch!(f32, "F", get_float_field, get_static_float_field, call_float_method_a, call_static_float_method_a, call_float_method, call_static_float_method);
primitive_dispatch!(f64, "D", get_double_field, get_static_double_field, call_double_method_a, call_static_double_method_a, call_double_method, call_static_double_method);

/// Reference kinds all share the object primitives and are cast afterwards.
macro_rules! reference_dispatch {
    ($($ty:ty => $sig:literal),* $(,)?) => {
        $(
            impl ReturnType for $ty {
                const SIGNATURE: &'static str = $sig;

                #[inline]
                fn call_method<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId, args: &[jvalue]) -> Result<Self> {
                    checked(env, |env| env.call_object_method_a(obj, method, args)).map(<$ty>::from_object)
                }

                #[inline]
                fn call_static_method<E: JniEnv + ?Sized>(
                    env: &E,
                    class: JClass,
                    method: MethodId,
                    args: &[jvalue],
                ) -> Result<Self> {
                    checked(env, |env| env.call_static_object_method_a(class, method, args)).map(<$ty>::from_object)
                }

                #[inline]
                fn call_method_direct<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId) -> Result<Self> {
                    checked(env, |env| env.call_object_method(obj, method)).map(<$ty>::from_object)
                }

                #[inline]
                fn call_static_method_direct<E: JniEnv + ?Sized>(env: &E, class: JClass, method: MethodId) -> Result<Self> {
                    checked(env, |env| env.call_static_object_method(class, method)).map(<$ty>::from_object)
                }
            }

            impl FieldType for $ty {
                #[inline]
                fn get_field<E: JniEnv + ?Sized>(env: &E, obj: JObject, field: FieldId) -> Result<Self> {
                    checked(env, |env| env.get_object_field(obj, field)).map(<$ty>::from_object)
                }

                #[inline]
                fn get_static_field<E: JniEnv + ?Sized>(env: &E, class: JClass, field: FieldId) -> Result<Self> {
                    checked(env, |env| env.get_static_object_field(class, field)).map(<$ty>::from_object)
                }
            }
        )*
    };
}

reference_dispatch! {
    JObject => "Ljava/lang/Object;",
    JString => "Ljava/lang/String;",
    JClass => "Ljava/lang/Class;",
    JThrowable => "Ljava/lang/Throwable;",
}

impl ReturnType for () {
    const SIGNATURE: &'static str = "V";

    #[inline]
    fn call_method<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId, args: &[jvalue]) -> Result<Self> {
        checked(env, |env| env.call_void_method_a(obj, method, args))
    }

    #[inline]
    fn call_static_method<E: JniEnv + ?Sized>(env: &E, class: JClass, method: MethodId, args: &[jvalue]) -> Result<Self> {
        checked(env, |env| env.call_static_void_method_a(class, method, args))
    }

    #[inline]
    fn call_method_direct<E: JniEnv + ?Sized>(env: &E, obj: JObject, method: MethodId) -> Result<Self> {
        checked(env, |env| env.call_void_method(obj, method))
    }

    #[inline]
    fn call_static_method_direct<E: JniEnv + ?Sized>(env: &E, class: JClass, method: MethodId) -> Result<Self> {
        checked(env, |env| env.call_static_void_method(class, method))
    }
}
