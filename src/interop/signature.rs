//! JVM type descriptors
//!
//! Field descriptors (`I`, `Ljava/lang/String;`, `[[D`) and method descriptors
//! (`(ILjava/lang/String;)V`), JVMS §4.3.

use super::types::Reference;
use std::fmt;
use std::str::FromStr;

/// Deepest array nesting a descriptor may express.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// A Java type as named by a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Only legal as a method return type.
    Void,
    /// Class in internal form, without the `L`/`;` delimiters.
    Object(String),
    Array(Box<JavaType>),
}

impl JavaType {
    /// Parse a complete field descriptor.
    pub fn parse_field(descriptor: &str) -> Result<Self, SignatureError> {
        let mut parser = Parser::new(descriptor);
        let ty = parser.value_type()?;
        parser.finish()?;
        Ok(ty)
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Render back into descriptor form.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("Z"),
            Self::Byte => f.write_str("B"),
            Self::Char => f.write_str("C"),
            Self::Short => f.write_str("S"),
            Self::Int => f.write_str("I"),
            Self::Long => f.write_str("J"),
            Self::Float => f.write_str("F"),
            Self::Double => f.write_str("D"),
            Self::Void => f.write_str("V"),
            Self::Object(class) => write!(f, "L{};", class),
            Self::Array(component) => write!(f, "[{}", component),
        }
    }
}

impl FromStr for JavaType {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field(s)
    }
}

/// Parameter and return types of a method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub params: Vec<JavaType>,
    pub ret: JavaType,
}

impl MethodSignature {
    pub fn parse(descriptor: &str) -> Result<Self, SignatureError> {
        let mut parser = Parser::new(descriptor);
        parser.expect(b'(', "method descriptor must start with '('")?;

        let mut params = Vec::new();
        while parser.peek() != Some(b')') {
            if parser.peek().is_none() {
                return Err(parser.error("unterminated parameter list"));
            }
            params.push(parser.value_type()?);
        }
        parser.expect(b')', "expected ')'")?;

        let ret = if parser.peek() == Some(b'V') {
            parser.pos += 1;
            JavaType::Void
        } else {
            parser.value_type()?
        };
        parser.finish()?;

        Ok(Self { params, ret })
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            write!(f, "{}", param)?;
        }
        write!(f, "){}", self.ret)
    }
}

impl FromStr for MethodSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check a caller-supplied field descriptor against the reference kind it
/// will be read as.
///
/// The descriptor must name a reference type. When `T` always denotes one
/// final class, the descriptor must name exactly that class.
pub fn check_reference_override<T: Reference>(descriptor: &str) -> Result<JavaType, SignatureError> {
    let ty = JavaType::parse_field(descriptor)?;
    if !ty.is_reference() {
        return Err(SignatureError::new(descriptor, 0, "override must name a reference type"));
    }
    if let Some(class) = T::FINAL_CLASS {
        if ty != JavaType::Object(class.to_string()) {
            return Err(SignatureError::new(descriptor, 0, "override does not match the requested reference kind"));
        }
    }
    Ok(ty)
}

/// Malformed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureError {
    pub descriptor: String,
    pub position: usize,
    pub reason: &'static str,
}

impl SignatureError {
    fn new(descriptor: &str, position: usize, reason: &'static str) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            position,
            reason,
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid descriptor '{}' at byte {}: {}",
            self.descriptor, self.position, self.reason
        )
    }
}

impl std::error::Error for SignatureError {}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, reason: &'static str) -> SignatureError {
        SignatureError::new(self.src, self.pos, reason)
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<(), SignatureError> {
        if self.peek() != Some(byte) {
            return Err(self.error(reason));
        }
        self.pos += 1;
        Ok(())
    }

    fn finish(&self) -> Result<(), SignatureError> {
        if self.pos != self.bytes.len() {
            return Err(self.error("trailing characters"));
        }
        Ok(())
    }

    /// Any type a field or parameter can have (everything but `V`).
    fn value_type(&mut self) -> Result<JavaType, SignatureError> {
        let mut dimensions = 0;
        while self.peek() == Some(b'[') {
            dimensions += 1;
            self.pos += 1;
        }
        if dimensions > MAX_ARRAY_DIMENSIONS {
            return Err(self.error("too many array dimensions"));
        }

        let start = self.pos;
        let mut ty = match self.peek() {
            Some(b'Z') => JavaType::Boolean,
            Some(b'B') => JavaType::Byte,
            Some(b'C') => JavaType::Char,
            Some(b'S') => JavaType::Short,
            Some(b'I') => JavaType::Int,
            Some(b'J') => JavaType::Long,
            Some(b'F') => JavaType::Float,
            Some(b'D') => JavaType::Double,
            Some(b'L') => {
                let name_start = start + 1;
                let len = self.bytes[name_start..]
                    .iter()
                    .position(|&b| b == b';')
                    .ok_or_else(|| self.error("unterminated class name"))?;
                if len == 0 {
                    return Err(self.error("empty class name"));
                }
                let name = &self.src[name_start..name_start + len];
                if name.contains(['.', '[']) {
                    return Err(self.error("class name must use internal form"));
                }
                self.pos = name_start + len;
                JavaType::Object(name.to_string())
            }
            Some(b'V') => return Err(self.error("void is only valid as a return type")),
            Some(_) => return Err(self.error("unknown type tag")),
            None => return Err(self.error("unexpected end of descriptor")),
        };
        self.pos += 1;

        for _ in 0..dimensions {
            ty = JavaType::Array(Box::new(ty));
        }
        Ok(ty)
    }
}
