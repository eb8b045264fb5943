//! The scalar converter: textual input in, typed [`Value`] out.
use std::str::FromStr;

use crate::errors::ConversionError;
use crate::kind::{ElemKind, Kind, Value};

/// The separator used to split sequence inputs, unless configured otherwise.
pub const DEFAULT_SEQUENCE_DELIMITER: char = ',';

/// Convert `raw` into a value of the given `kind`.
///
/// # Rules
///
/// - Integers are parsed in base 10 and must fit the width of the kind.
///   Unsigned kinds reject any sign.
/// - Floats accept the usual decimal literal forms (sign, fraction, exponent),
///   as well as explicit infinities and NaN. Finite literals that overflow the
///   width are rejected.
/// - Booleans accept `1`, `t`, `T`, `TRUE`, `true`, `True` and
///   `0`, `f`, `F`, `FALSE`, `false`, `False`. Nothing else.
/// - Strings must be non-empty; the input is copied verbatim.
/// - Sequences are split on `,`. Empty segments are kept: they are invalid
///   elements of a `Vec<i64>` and empty strings in a `Vec<String>`.
///
/// Whitespace is never trimmed.
///
/// # Example
///
/// ```rust
/// use parambind::{convert, Kind, ElemKind, Value};
///
/// assert_eq!(convert("42", Kind::U8).unwrap(), Value::U8(42));
/// assert_eq!(
///     convert("1,2,3", Kind::Seq(ElemKind::I64)).unwrap(),
///     Value::I64Seq(vec![1, 2, 3])
/// );
/// assert!(convert("256", Kind::U8).is_err());
/// ```
pub fn convert(raw: &str, kind: Kind) -> Result<Value, ConversionError> {
    convert_with(raw, kind, DEFAULT_SEQUENCE_DELIMITER)
}

/// Same as [`convert`], but splitting sequences on `delimiter`.
pub(crate) fn convert_with(
    raw: &str,
    kind: Kind,
    delimiter: char,
) -> Result<Value, ConversionError> {
    let value = match kind {
        Kind::I8 => Value::I8(signed(raw, kind)?),
        Kind::I16 => Value::I16(signed(raw, kind)?),
        Kind::I32 => Value::I32(signed(raw, kind)?),
        Kind::I64 => Value::I64(signed(raw, kind)?),
        Kind::Isize => Value::Isize(signed(raw, kind)?),
        Kind::U8 => Value::U8(unsigned(raw, kind)?),
        Kind::U16 => Value::U16(unsigned(raw, kind)?),
        Kind::U32 => Value::U32(unsigned(raw, kind)?),
        Kind::U64 => Value::U64(unsigned(raw, kind)?),
        Kind::Usize => Value::Usize(unsigned(raw, kind)?),
        Kind::F32 => Value::F32(float(raw, kind)?),
        Kind::F64 => Value::F64(float(raw, kind)?),
        Kind::Bool => Value::Bool(boolean(raw)?),
        Kind::String => {
            if raw.is_empty() {
                return Err(ConversionError::Empty);
            }
            Value::String(raw.to_owned())
        }
        Kind::Seq(ElemKind::I64) => Value::I64Seq(
            raw.split(delimiter)
                .enumerate()
                .map(|(index, element)| {
                    signed(element, Kind::I64).map_err(|e| ConversionError::Element {
                        index,
                        source: Box::new(e),
                    })
                })
                .collect::<Result<_, _>>()?,
        ),
        Kind::Seq(ElemKind::String) => {
            Value::StringSeq(raw.split(delimiter).map(ToOwned::to_owned).collect())
        }
    };
    Ok(value)
}

fn malformed(raw: &str, kind: Kind) -> ConversionError {
    if raw.is_empty() {
        ConversionError::Empty
    } else {
        ConversionError::Malformed {
            raw: raw.to_owned(),
            kind,
        }
    }
}

fn signed<T: FromStr>(raw: &str, kind: Kind) -> Result<T, ConversionError> {
    raw.parse().map_err(|_| malformed(raw, kind))
}

fn unsigned<T: FromStr>(raw: &str, kind: Kind) -> Result<T, ConversionError> {
    // `FromStr` for unsigned integers tolerates a leading `+`.
    if raw.starts_with('+') {
        return Err(malformed(raw, kind));
    }
    raw.parse().map_err(|_| malformed(raw, kind))
}

fn float<T>(raw: &str, kind: Kind) -> Result<T, ConversionError>
where
    T: FromStr + Into<f64> + Copy,
{
    let value: T = raw.parse().map_err(|_| malformed(raw, kind))?;
    // `FromStr` saturates to infinity on overflow; only explicit infinities are accepted.
    if value.into().is_infinite() {
        let unsigned = raw.trim_start_matches(['+', '-']);
        if !unsigned
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("inf"))
        {
            return Err(malformed(raw, kind));
        }
    }
    Ok(value)
}

fn boolean(raw: &str) -> Result<bool, ConversionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(malformed(raw, Kind::Bool)),
    }
}
