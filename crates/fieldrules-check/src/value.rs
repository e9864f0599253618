use std::fmt;

use fieldrules_tag::ClauseKind;
use serde_json::Value;

/// Declared kind of a field on a type's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Int,
    UInt,
    Float,
    Bool,
    List,
    /// A nested structured value (set or unset).
    Message,
    /// Kind known only at runtime (e.g. fields of a JSON record).
    Any,
}

impl FieldKind {
    /// Whether a clause of `kind` can apply to fields of this kind.
    ///
    /// `Any` accepts every clause; mismatches surface at evaluation time.
    pub fn supports(self, kind: ClauseKind) -> bool {
        match kind {
            ClauseKind::Required => true,
            ClauseKind::Min | ClauseKind::Max => matches!(
                self,
                FieldKind::Text
                    | FieldKind::Int
                    | FieldKind::UInt
                    | FieldKind::Float
                    | FieldKind::List
                    | FieldKind::Any
            ),
            ClauseKind::OneOf => matches!(
                self,
                FieldKind::Text | FieldKind::Int | FieldKind::UInt | FieldKind::Any
            ),
            ClauseKind::Format(_) => matches!(self, FieldKind::Text | FieldKind::Any),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Int => "int",
            FieldKind::UInt => "uint",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::List => "list",
            FieldKind::Message => "message",
            FieldKind::Any => "any",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value of one field, borrowed from the instance being validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// A sequence, represented by its element count.
    List(usize),
    /// A set nested message.
    Message,
    /// Unset optional, `null`, or a missing record key.
    Absent,
}

impl<'a> FieldValue<'a> {
    /// Map a JSON value onto a field value. Objects count as set messages.
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::List(items.len()),
            Value::Object(_) => FieldValue::Message,
        }
    }

    /// Present-or-absent nested message.
    pub fn message<T>(value: Option<&T>) -> Self {
        match value {
            Some(_) => FieldValue::Message,
            None => FieldValue::Absent,
        }
    }

    /// Text field; an unset `Option` reads as absent.
    pub fn text<S: TextSource + ?Sized>(value: &'a S) -> Self {
        value.as_text().map_or(FieldValue::Absent, FieldValue::Text)
    }

    /// Sequence field, by element count.
    pub fn list<S: ListSource + ?Sized>(value: &S) -> Self {
        value.list_len().map_or(FieldValue::Absent, FieldValue::List)
    }

    pub fn int<S: IntSource + ?Sized>(value: &S) -> Self {
        value.as_int().map_or(FieldValue::Absent, FieldValue::Int)
    }

    pub fn uint<S: UIntSource + ?Sized>(value: &S) -> Self {
        value.as_uint().map_or(FieldValue::Absent, FieldValue::UInt)
    }

    pub fn float<S: FloatSource + ?Sized>(value: &S) -> Self {
        value.as_float().map_or(FieldValue::Absent, FieldValue::Float)
    }

    pub fn bool<S: BoolSource + ?Sized>(value: &S) -> Self {
        value.as_bool().map_or(FieldValue::Absent, FieldValue::Bool)
    }

    /// Runtime kind, or `None` for an absent value.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Int(_) => Some(FieldKind::Int),
            FieldValue::UInt(_) => Some(FieldKind::UInt),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Bool(_) => Some(FieldKind::Bool),
            FieldValue::List(_) => Some(FieldKind::List),
            FieldValue::Message => Some(FieldKind::Message),
            FieldValue::Absent => None,
        }
    }

    /// Whether this is the "empty" representative of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Int(i) => *i == 0,
            FieldValue::UInt(u) => *u == 0,
            FieldValue::Float(f) => *f == 0.0,
            FieldValue::Bool(b) => !*b,
            FieldValue::List(len) => *len == 0,
            FieldValue::Message => false,
            FieldValue::Absent => true,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("absent", FieldKind::as_str)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value.as_str())
    }
}

impl<'a, T> From<&'a Vec<T>> for FieldValue<'a> {
    fn from(value: &'a Vec<T>) -> Self {
        FieldValue::List(value.len())
    }
}

impl<'a, T> From<&'a [T]> for FieldValue<'a> {
    fn from(value: &'a [T]) -> Self {
        FieldValue::List(value.len())
    }
}

/// Rust field types that hold text.
pub trait TextSource {
    fn as_text(&self) -> Option<&str>;
}

impl TextSource for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextSource for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: TextSource> TextSource for Option<T> {
    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(TextSource::as_text)
    }
}

/// Rust field types that hold a sequence.
pub trait ListSource {
    fn list_len(&self) -> Option<usize>;
}

impl<T> ListSource for [T] {
    fn list_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> ListSource for Vec<T> {
    fn list_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: ListSource> ListSource for Option<T> {
    fn list_len(&self) -> Option<usize> {
        self.as_ref().and_then(ListSource::list_len)
    }
}

macro_rules! scalar_source {
    ($(#[$doc:meta])* $trait:ident :: $method:ident -> $repr:ty { $($ty:ty),+ }) => {
        $(#[$doc])*
        pub trait $trait {
            fn $method(&self) -> Option<$repr>;
        }

        $(
            impl $trait for $ty {
                fn $method(&self) -> Option<$repr> {
                    Some(<$repr>::from(*self))
                }
            }
        )+

        impl<T: $trait> $trait for Option<T> {
            fn $method(&self) -> Option<$repr> {
                self.as_ref().and_then($trait::$method)
            }
        }
    };
}

scalar_source!(
    /// Signed integer field types.
    IntSource::as_int -> i64 { i8, i16, i32, i64 }
);
scalar_source!(
    /// Unsigned integer field types.
    UIntSource::as_uint -> u64 { u8, u16, u32, u64 }
);
scalar_source!(
    /// Floating point field types.
    FloatSource::as_float -> f64 { f32, f64 }
);
scalar_source!(BoolSource::as_bool -> bool { bool });

macro_rules! impl_from_number {
    ($variant:ident as $repr:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(<$repr>::from(value))
                }
            }

            impl From<&$ty> for FieldValue<'_> {
                fn from(value: &$ty) -> Self {
                    FieldValue::$variant(<$repr>::from(*value))
                }
            }
        )+
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64);
impl_from_number!(UInt as u64: u8, u16, u32, u64);
impl_from_number!(Float as f64: f32, f64);
impl_from_number!(Bool as bool: bool);
