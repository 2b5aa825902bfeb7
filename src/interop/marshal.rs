//! String marshaling between Rust and Java strings

use super::env::JniEnv;
use super::exception::{check_exception, checked};
use super::mutf8;
use super::types::JString;
use crate::errors::Result;
use std::ffi::CStr;

/// Copy a Java string into a Rust `String`.
///
/// Returns an empty string for a null handle, or when the JVM cannot hand out
/// the characters. Never leaves an exception pending.
pub fn foreign_to_local_string<E: JniEnv + ?Sized>(env: &E, string: JString) -> String {
    if string.is_null() {
        return String::new();
    }

    let chars = env.get_string_utf_chars(string);
    if chars.is_null() {
        // An OutOfMemoryError may be pending; it is cleared and dropped here.
        let _ = check_exception(env);
        return String::new();
    }

    // SAFETY: non-null `GetStringUTFChars` buffers are NUL-terminated and stay
    // valid until released below.
    let text = mutf8::decode(unsafe { CStr::from_ptr(chars) }.to_bytes()).into_owned();
    unsafe { env.release_string_utf_chars(string, chars) };
    text
}

/// Create a new Java string holding `text`.
///
/// The caller owns the returned local reference.
pub fn local_to_foreign_string<E: JniEnv + ?Sized>(env: &E, text: &str) -> Result<JString> {
    let encoded = mutf8::encode(text);
    checked(env, |env| env.new_string_utf(&encoded))
}
