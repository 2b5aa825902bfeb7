//! Handle types for values that cross the JNI boundary
//!
//! Every handle is a `#[repr(transparent)]` wrapper over the raw `jni-sys`
//! pointer. Handles are `Copy`: copying one never creates a new JNI reference,
//! ownership of local references is tracked separately by `LocalRef`.

use core::ptr;
use jni_sys::{jfieldID, jmethodID, jobject};

/// Handle kinds that are JNI object references.
///
/// `from_object` is the unchecked cast between reference kinds; the caller
/// vouches for the runtime class of the object.
pub trait Reference: Copy {
    /// The null handle of this kind.
    const NULL: Self;

    /// Internal name of the class every instance of this kind has, when that
    /// class is final (so a field descriptor for it can only name this class).
    const FINAL_CLASS: Option<&'static str>;

    /// Reinterpret a generic object handle as this kind.
    fn from_object(obj: JObject) -> Self;

    /// The raw `jobject` behind this handle.
    fn as_raw(&self) -> jobject;

    /// View this handle as a generic object.
    #[inline]
    fn as_object(&self) -> JObject {
        JObject(self.as_raw())
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.as_raw().is_null()
    }
}

macro_rules! reference_kind {
    ($(#[$meta:meta])* $name:ident, $final_class:expr) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(jobject);

        impl $name {
            /// The null handle.
            #[inline]
            pub const fn null() -> Self {
                Self(ptr::null_mut())
            }

            /// Wrap a raw reference.
            ///
            /// # Safety
            /// `raw` must be null or a live reference owned by the env it is
            /// used with.
            #[inline]
            pub const unsafe fn from_raw(raw: jobject) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn as_raw(&self) -> jobject {
                self.0
            }

            #[inline]
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }
        }

        impl Reference for $name {
            const NULL: Self = Self::null();
            const FINAL_CLASS: Option<&'static str> = $final_class;

            #[inline]
            fn from_object(obj: JObject) -> Self {
                Self(obj.0)
            }

            #[inline]
            fn as_raw(&self) -> jobject {
                self.0
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::null()
            }
        }
    };
}

reference_kind!(
    /// Any object reference (`jobject`).
    JObject,
    None
);
reference_kind!(
    /// A `java.lang.Class` reference (`jclass`).
    JClass,
    Some("java/lang/Class")
);
reference_kind!(
    /// A `java.lang.String` reference (`jstring`).
    JString,
    Some("java/lang/String")
);
reference_kind!(
    /// A `java.lang.Throwable` reference (`jthrowable`).
    JThrowable,
    None
);

macro_rules! widen_to_object {
    ($($name:ident),*) => {
        $(
            impl From<$name> for JObject {
                #[inline]
                fn from(handle: $name) -> Self {
                    handle.as_object()
                }
            }
        )*
    };
}

widen_to_object!(JClass, JString, JThrowable);

/// Resolved method identifier (`jmethodID`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(jmethodID);

impl MethodId {
    #[inline]
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    /// # Safety
    /// `raw` must be null or an id produced by the env it is used with.
    #[inline]
    pub const unsafe fn from_raw(raw: jmethodID) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(&self) -> jmethodID {
        self.0
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Resolved field identifier (`jfieldID`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(jfieldID);

impl FieldId {
    #[inline]
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    /// # Safety
    /// `raw` must be null or an id produced by the env it is used with.
    #[inline]
    pub const unsafe fn from_raw(raw: jfieldID) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(&self) -> jfieldID {
        self.0
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Explicit null argument, packed as a null object reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;
