//! Packing Rust argument lists into `jvalue` arrays
//!
//! An argument list is `()`, a tuple of up to twelve values, or an array.
//! Cells are written in declaration order. The packed array always has at
//! least one cell, a zeroed placeholder when there are no arguments.
//!
//! String arguments become new Java strings, and a `None` string is a null
//! reference. What happens to created strings after the call depends on
//! `EnvOptions::transient_strings`.

use super::env::{JniEnv, TransientPolicy};
use super::local_ref::LocalRef;
use super::marshal::local_to_foreign_string;
use super::types::{JClass, JObject, JString, JThrowable, Null, Reference};
use crate::errors::Result;
use crate::logging::log_transient_strings;
use jni_sys::{jvalue, JNI_FALSE, JNI_TRUE};
use smallvec::SmallVec;
use std::fmt;

/// Cells kept inline before spilling to the heap.
const INLINE_CELLS: usize = 8;

/// The argument cell array of one call.
pub struct ArgCells<'env, E: JniEnv + ?Sized> {
    env: &'env E,
    cells: SmallVec<[jvalue; INLINE_CELLS]>,
    transient: SmallVec<[JString; 2]>,
    policy: TransientPolicy,
}

impl<'env, E: JniEnv + ?Sized> ArgCells<'env, E> {
    /// Pack `args`. On failure, strings created so far are released.
    pub fn pack<A: IntoArgs>(env: &'env E, args: A) -> Result<Self> {
        let mut cells = Self {
            env,
            cells: SmallVec::with_capacity(A::LEN.max(1)),
            transient: SmallVec::new(),
            policy: env.options().transient_strings,
        };
        args.pack_into(&mut cells)?;
        if cells.cells.is_empty() {
            cells.cells.push(jvalue { j: 0 });
        }
        Ok(cells)
    }

    #[inline]
    pub fn push(&mut self, cell: jvalue) {
        self.cells.push(cell);
    }

    /// Create a Java string for `text` and push it as an object cell.
    pub fn push_string(&mut self, text: &str) -> Result<()> {
        let string = local_to_foreign_string(self.env, text)?;
        if !string.is_null() {
            self.transient.push(string);
        }
        self.push(jvalue { l: string.as_raw() });
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[jvalue] {
        &self.cells
    }

    /// Number of cells, at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Strings created while packing.
    #[inline]
    pub fn transient_strings(&self) -> &[JString] {
        &self.transient
    }
}

impl<E: JniEnv + ?Sized> Drop for ArgCells<'_, E> {
    fn drop(&mut self) {
        if self.transient.is_empty() {
            return;
        }
        let count = self.transient.len();
        let release = self.policy == TransientPolicy::ReleaseAfterCall;
        if release {
            for string in self.transient.drain(..) {
                self.env.delete_local_ref(string.as_object());
            }
        }
        log_transient_strings(count, release);
    }
}

impl<E: JniEnv + ?Sized> fmt::Debug for ArgCells<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgCells")
            .field("len", &self.cells.len())
            .field("transient", &self.transient)
            .field("policy", &self.policy)
            .finish()
    }
}

/// A value that can be passed as one Java argument.
pub trait IntoArg {
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()>;
}

macro_rules! primitive_arg {
    ($($ty:ty => $slot:ident),* $(,)?) => {
        $(
            impl IntoArg for $ty {
                #[inline]
                fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
                    cells.push(jvalue { $slot: self });
                    Ok(())
                }
            }
        )*
    };
}

primitive_arg! {
    i8 => b,
    u16 => c,
    i16 => s,
    i32 => i,
    i64 => j,
    f32 => f,
    f64 => d,
}

impl IntoArg for bool {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push(jvalue {
            z: if self { JNI_TRUE } else { JNI_FALSE },
        });
        Ok(())
    }
}

macro_rules! reference_arg {
    ($($ty:ty),*) => {
        $(
            impl IntoArg for $ty {
                #[inline]
                fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
                    cells.push(jvalue { l: self.as_raw() });
                    Ok(())
                }
            }
        )*
    };
}

reference_arg!(JObject, JClass, JString, JThrowable);

impl<T: Reference> IntoArg for Option<T> {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push(jvalue {
            l: self.unwrap_or(T::NULL).as_raw(),
        });
        Ok(())
    }
}

impl IntoArg for Null {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push(jvalue { l: JObject::null().as_raw() });
        Ok(())
    }
}

impl<G: JniEnv + ?Sized, T: Reference> IntoArg for &LocalRef<'_, G, T> {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push(jvalue { l: self.get().as_raw() });
        Ok(())
    }
}

impl IntoArg for &str {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push_string(self)
    }
}

impl IntoArg for String {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push_string(&self)
    }
}

impl IntoArg for &String {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        cells.push_string(self)
    }
}

/// `None` is passed as a null string reference.
impl IntoArg for Option<&str> {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        match self {
            Some(text) => cells.push_string(text),
            None => Null.push_into(cells),
        }
    }
}

impl IntoArg for Option<String> {
    #[inline]
    fn push_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        self.as_deref().push_into(cells)
    }
}

/// An ordered argument list.
pub trait IntoArgs {
    /// Number of declared arguments.
    const LEN: usize;

    fn pack_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()>;
}

impl IntoArgs for () {
    const LEN: usize = 0;

    #[inline]
    fn pack_into<E: JniEnv + ?Sized>(self, _cells: &mut ArgCells<'_, E>) -> Result<()> {
        Ok(())
    }
}

impl<T: IntoArg, const N: usize> IntoArgs for [T; N] {
    const LEN: usize = N;

    fn pack_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
        for arg in self {
            arg.push_into(cells)?;
        }
        Ok(())
    }
}

macro_rules! tuple_args {
    ($($T:ident . $idx:tt),+) => {
        impl<$($T: IntoArg),+> IntoArgs for ($($T,)+) {
            const LEN: usize = [$(stringify!($T)),+].len();

            #[inline]
            fn pack_into<E: JniEnv + ?Sized>(self, cells: &mut ArgCells<'_, E>) -> Result<()> {
                $( self.$idx.push_into(cells)?; )+
                Ok(())
            }
        }
    };
}

tuple_args!(A.0);
tuple_args!(A.0, B.1);
tuple_args!(A.0, B.1, C.2);
tuple_args!(A.0, B.1, C.2, D.3);
tuple_args!(A.0, B.1, C.2, D.3, F.4);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10);
tuple_args!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10, M.11);
