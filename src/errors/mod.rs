use crate::interop::JThrowable;
use std::fmt;

/// What a failed lookup was trying to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Class,
    Method,
    StaticMethod,
    Constructor,
    Field,
    StaticField,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::StaticMethod => "static method",
            Self::Constructor => "constructor",
            Self::Field => "field",
            Self::StaticField => "static field",
        };
        f.write_str(name)
    }
}

/// Failure of a bridged JNI operation.
///
/// Both variants carry the throwable captured from the JVM, if one was
/// pending. The throwable is a local reference now owned by the receiver of
/// the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JniError {
    /// A class, method or field did not resolve against the given name and
    /// signature.
    LookupFailed {
        member: MemberKind,
        name: String,
        signature: Option<String>,
        exception: JThrowable,
    },
    /// A call returned with an exception pending.
    ForeignFault { exception: JThrowable },
}

impl JniError {
    /// Lookup failure with no throwable attached.
    pub fn lookup_failed(member: MemberKind, name: &str, signature: Option<&str>) -> Self {
        Self::LookupFailed {
            member,
            name: name.to_string(),
            signature: signature.map(str::to_string),
            exception: JThrowable::null(),
        }
    }

    pub fn foreign_fault(exception: JThrowable) -> Self {
        Self::ForeignFault { exception }
    }

    /// The captured throwable; null when the failure had none.
    pub fn exception(&self) -> JThrowable {
        match self {
            Self::LookupFailed { exception, .. } | Self::ForeignFault { exception } => *exception,
        }
    }

    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LookupFailed { .. })
    }

    pub fn is_foreign_fault(&self) -> bool {
        matches!(self, Self::ForeignFault { .. })
    }

    /// Re-tag a fault raised while resolving a member as a lookup failure,
    /// keeping the throwable.
    pub(crate) fn into_lookup(self, member: MemberKind, name: &str, signature: Option<&str>) -> Self {
        match self {
            Self::ForeignFault { exception } => Self::LookupFailed {
                member,
                name: name.to_string(),
                signature: signature.map(str::to_string),
                exception,
            },
            lookup @ Self::LookupFailed { .. } => lookup,
        }
    }
}

impl fmt::Display for JniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookupFailed { member, name, signature: Some(signature), .. } => {
                write!(f, "Lookup failed: {} '{}' with signature '{}'", member, name, signature)
            }
            Self::LookupFailed { member, name, signature: None, .. } => {
                write!(f, "Lookup failed: {} '{}'", member, name)
            }
            Self::ForeignFault { exception } => {
                write!(f, "JNI exception occurred (throwable {:p})", exception.as_raw())
            }
        }
    }
}

impl std::error::Error for JniError {}

/// Result alias used by every bridged operation.
pub type Result<T> = std::result::Result<T, JniError>;
