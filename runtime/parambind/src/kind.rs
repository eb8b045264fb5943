//! The closed set of field types the binder knows how to populate.
use std::fmt;

/// The kind of a bindable field.
///
/// Every field of a [`Record`](crate::Record) has exactly one kind, determined by its
/// Rust type via [`FieldType::KIND`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    String,
    /// A comma-separated sequence of elements.
    Seq(ElemKind),
}

/// The element kind of a [`Kind::Seq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemKind {
    I64,
    String,
}

impl Kind {
    /// `true` for the signed integer kinds, the ones `Range` and `Min` apply to.
    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::Isize
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Bool => "bool",
            Kind::String => "String",
            Kind::Seq(ElemKind::I64) => "Vec<i64>",
            Kind::Seq(ElemKind::String) => "Vec<String>",
        };
        f.write_str(s)
    }
}

/// A typed field value, produced by the [scalar converter](crate::convert) and
/// consumed by a field setter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    I64Seq(Vec<i64>),
    StringSeq(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::I64Seq(_) => Kind::Seq(ElemKind::I64),
            Value::StringSeq(_) => Kind::Seq(ElemKind::String),
        }
    }

    /// The value widened to `i64`, if it holds a signed integer.
    pub fn as_signed(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v),
            Value::Isize(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// The length of a string (in unicode code points) or of a sequence (in elements).
    ///
    /// `None` for every other kind.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::I64Seq(v) => Some(v.len()),
            Value::StringSeq(v) => Some(v.len()),
            _ => None,
        }
    }
}

/// Rust types that can be the type of a bindable field.
///
/// Implemented for the closed set of supported kinds; `#[derive(Bind)]` refers to
/// it for every field, so an unsupported field type is a compile error.
pub trait FieldType: Sized {
    /// The kind the scalar converter must produce for this type.
    const KIND: Kind;

    /// Extract `Self` from a value of kind [`Self::KIND`].
    ///
    /// Returns `None` if the value holds a different kind.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! field_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: Kind = Kind::$variant;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

field_type! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
}

impl FieldType for Vec<i64> {
    const KIND: Kind = Kind::Seq(ElemKind::I64);

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::I64Seq(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for Vec<String> {
    const KIND: Kind = Kind::Seq(ElemKind::String);

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringSeq(v) => Some(v),
            _ => None,
        }
    }
}
