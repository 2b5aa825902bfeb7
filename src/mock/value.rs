//! Values seen by mock method bodies

use crate::interop::{JObject, JString, JavaType, Reference};
use std::fmt;

/// Value kind a JNI primitive reads or returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object,
}

impl Kind {
    pub fn of(ty: &JavaType) -> Self {
        match ty {
            JavaType::Boolean => Self::Boolean,
            JavaType::Byte => Self::Byte,
            JavaType::Char => Self::Char,
            JavaType::Short => Self::Short,
            JavaType::Int => Self::Int,
            JavaType::Long => Self::Long,
            JavaType::Float => Self::Float,
            JavaType::Double => Self::Double,
            JavaType::Void => Self::Void,
            JavaType::Object(_) | JavaType::Array(_) => Self::Object,
        }
    }
}

/// A Java value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    #[default]
    Void,
    Boolean(bool),
    Byte(i8),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Object(JObject),
}

impl Value {
    /// Zero value of `kind`, what a JVM returns from a call that threw
    pub fn zero(kind: Kind) -> Self {
        match kind {
            Kind::Void => Self::Void,
            Kind::Boolean => Self::Boolean(false),
            Kind::Byte => Self::Byte(0),
            Kind::Char => Self::Char(0),
            Kind::Short => Self::Short(0),
            Kind::Int => Self::Int(0),
            Kind::Long => Self::Long(0),
            Kind::Float => Self::Float(0.0),
            Kind::Double => Self::Double(0.0),
            Kind::Object => Self::Object(JObject::null()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Void => Kind::Void,
            Self::Boolean(_) => Kind::Boolean,
            Self::Byte(_) => Kind::Byte,
            Self::Char(_) => Kind::Char,
            Self::Short(_) => Kind::Short,
            Self::Int(_) => Kind::Int,
            Self::Long(_) => Kind::Long,
            Self::Float(_) => Kind::Float,
            Self::Double(_) => Kind::Double,
            Self::Object(_) => Kind::Object,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Self::Byte(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<u16> {
        match *self {
            Self::Char(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match *self {
            Self::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Self::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Self::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<JObject> {
        match *self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_void(&self) -> Option<()> {
        match self {
            Self::Void => Some(()),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i8 => Byte,
    u16 => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    JObject => Object,
}

impl From<JString> for Value {
    fn from(v: JString) -> Self {
        Self::Object(v.as_object())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Void
    }
}

/// A Java exception raised by a mock body, or captured from the VM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown {
    /// Internal class name, e.g. `java/lang/IllegalStateException`
    pub class: String,
    pub message: String,
}

impl Thrown {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class.replace('/', "."), self.message)
    }
}

/// What a mock body is called with
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Receiver; null for static methods
    pub this: JObject,
    pub class: String,
    pub name: String,
    pub signature: String,
    pub args: Vec<Value>,
}

impl Invocation {
    /// Argument `index`, `Value::Void` when out of range
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).copied().unwrap_or_default()
    }
}

/// One call observed by the VM
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub class: String,
    pub name: String,
    pub signature: String,
    pub args: Vec<Value>,
    /// Made through a zero-argument primitive rather than an argument array
    pub direct: bool,
}
