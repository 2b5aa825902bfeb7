//! Modified UTF-8, the string encoding of the JNI `*UTF` functions
//!
//! Differs from UTF-8 in two ways: U+0000 is written as `C0 80`, and
//! characters above U+FFFF are written as a surrogate pair, three bytes per
//! surrogate. The encoded form therefore never contains a zero byte.

use std::borrow::Cow;
use std::ffi::CString;

/// Encode text for `NewStringUTF` and the reflective lookups.
pub fn encode(text: &str) -> CString {
    let mut out = Vec::with_capacity(text.len() + 1);
    for ch in text.chars() {
        let code = ch as u32;
        match code {
            0 => out.extend_from_slice(&[0xC0, 0x80]),
            0x01..=0x7F => out.push(code as u8),
            0x80..=0xFFFF => {
                let mut buf = [0u8; 3];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units).iter() {
                    push_three_byte(&mut out, *unit);
                }
            }
        }
    }
    // SAFETY: every branch above emits only non-zero bytes.
    unsafe { CString::from_vec_unchecked(out) }
}

fn push_three_byte(out: &mut Vec<u8>, unit: u16) {
    out.push(0xE0 | (unit >> 12) as u8);
    out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
    out.push(0x80 | (unit & 0x3F) as u8);
}

/// Decode bytes handed out by `GetStringUTFChars`.
///
/// Borrowed when the input is already plain UTF-8. Malformed sequences and
/// unpaired surrogates decode to U+FFFD.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    // `C0 80` and encoded surrogates are both invalid UTF-8, so input that
    // passes this check has the same meaning in either encoding.
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(String::from_utf16_lossy(&to_utf16(bytes)))
}

fn to_utf16(bytes: &[u8]) -> Vec<u16> {
    const REPLACEMENT: u16 = 0xFFFD;

    let continuation = |i: usize| bytes.get(i).copied().filter(|b| b & 0xC0 == 0x80).map(|b| (b & 0x3F) as u32);

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        match lead {
            0x00..=0x7F => {
                units.push(lead as u16);
                i += 1;
            }
            0xC0..=0xDF => match continuation(i + 1) {
                Some(c1) => {
                    units.push(((((lead & 0x1F) as u32) << 6) | c1) as u16);
                    i += 2;
                }
                None => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            },
            0xE0..=0xEF => match (continuation(i + 1), continuation(i + 2)) {
                (Some(c1), Some(c2)) => {
                    units.push(((((lead & 0x0F) as u32) << 12) | (c1 << 6) | c2) as u16);
                    i += 3;
                }
                _ => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            },
            // Standard 4-byte UTF-8 is not produced by the JVM, accept it anyway.
            0xF0..=0xF4 => match (continuation(i + 1), continuation(i + 2), continuation(i + 3)) {
                (Some(c1), Some(c2), Some(c3)) => {
                    let code = (((lead & 0x07) as u32) << 18) | (c1 << 12) | (c2 << 6) | c3;
                    match char::from_u32(code) {
                        Some(ch) => {
                            let mut pair = [0u16; 2];
                            units.extend_from_slice(ch.encode_utf16(&mut pair));
                        }
                        None => units.push(REPLACEMENT),
                    }
                    i += 4;
                }
                _ => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            },
            _ => {
                units.push(REPLACEMENT);
                i += 1;
            }
        }
    }
    units
}
