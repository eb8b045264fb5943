//! Named predicates that can be attached to a field via its `params` metadata.
//!
//! A validator receives the converted field value plus a fixed list of extra
//! arguments. The argument types are declared up front, so that literal arguments
//! (e.g. `1` and `10` in `Range(1,10)`) are coerced once, when the field plan is
//! compiled, rather than on every bind.
use std::collections::HashMap;
use std::fmt;

use crate::kind::Value;

mod builtin;

/// The type of a validator argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// A 64-bit signed integer.
    Int64,
    /// A platform-native signed integer.
    Int,
    /// A string, taken verbatim.
    String,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Int64 => f.write_str("an `i64`"),
            ArgType::Int => f.write_str("an `isize`"),
            ArgType::String => f.write_str("a string"),
        }
    }
}

/// A validator argument, already coerced to the declared [`ArgType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int64(i64),
    Int(isize),
    String(String),
}

impl Arg {
    /// Coerce a textual argument to `ty`.
    ///
    /// Integers are parsed in base 10; strings are taken as they are.
    pub fn coerce(raw: &str, ty: ArgType) -> Option<Arg> {
        match ty {
            ArgType::Int64 => raw.parse().ok().map(Arg::Int64),
            ArgType::Int => raw.parse().ok().map(Arg::Int),
            ArgType::String => Some(Arg::String(raw.to_owned())),
        }
    }

    pub fn ty(&self) -> ArgType {
        match self {
            Arg::Int64(_) => ArgType::Int64,
            Arg::Int(_) => ArgType::Int,
            Arg::String(_) => ArgType::String,
        }
    }
}

/// The predicate behind a validator.
///
/// It must return `false` if `args` doesn't match the declared signature.
pub type Predicate = fn(value: &Value, args: &[Arg]) -> bool;

/// A registered validator: its declared argument types and its predicate.
#[derive(Clone, Copy)]
pub struct Validator {
    name: &'static str,
    params: &'static [ArgType],
    predicate: Predicate,
}

impl Validator {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared argument types, excluding the implicit value under test.
    pub fn params(&self) -> &'static [ArgType] {
        self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The failure modes of [`ValidatorRegistry::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// No validator is registered under that name.
    Unknown,
    /// The predicate returned `false`.
    Rejected,
}

/// A closed set of named validators.
///
/// [`ValidatorRegistry::builtin`] (also the [`Default`]) provides:
///
/// | Name              | Arguments            | Passes when                                        |
/// |-------------------|----------------------|----------------------------------------------------|
/// | `Range(min, max)` | `i64`, `i64`         | `min <= value <= max`, for signed integer fields   |
/// | `Min(min)`        | `i64`                | `value >= min`, for signed integer fields          |
/// | `Length(min, max)`| `isize`, `isize`     | `min <= len <= max`, for strings (in code points) and sequences (in elements) |
///
/// Applying a validator to a field kind it doesn't understand (e.g. `Range` on a
/// string) is not detected up front: the predicate simply fails at bind time.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<&'static str, Validator>,
}

impl ValidatorRegistry {
    /// The registry of built-in validators.
    pub fn builtin() -> Self {
        let mut registry = Self {
            validators: HashMap::new(),
        };
        registry.insert("Range", &[ArgType::Int64, ArgType::Int64], builtin::range);
        registry.insert("Min", &[ArgType::Int64], builtin::min);
        registry.insert("Length", &[ArgType::Int, ArgType::Int], builtin::length);
        registry
    }

    fn insert(&mut self, name: &'static str, params: &'static [ArgType], predicate: Predicate) {
        self.validators.insert(
            name,
            Validator {
                name,
                params,
                predicate,
            },
        );
    }

    /// Look up a validator by name.
    pub fn get(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    /// The declared argument types of a validator, excluding the implicit value under test.
    pub fn signature(&self, name: &str) -> Option<&'static [ArgType]> {
        self.get(name).map(Validator::params)
    }

    /// Invoke the validator registered as `name` on `value`.
    pub fn call(&self, name: &str, value: &Value, args: &[Arg]) -> Result<(), CallError> {
        let validator = self.get(name).ok_or(CallError::Unknown)?;
        if (validator.predicate)(value, args) {
            Ok(())
        } else {
            Err(CallError::Rejected)
        }
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_signatures() {
        let registry = ValidatorRegistry::builtin();
        assert_eq!(
            registry.signature("Range"),
            Some(&[ArgType::Int64, ArgType::Int64][..])
        );
        assert_eq!(registry.signature("Min"), Some(&[ArgType::Int64][..]));
        assert_eq!(
            registry.signature("Length"),
            Some(&[ArgType::Int, ArgType::Int][..])
        );
        assert_eq!(registry.signature("range"), None);
    }

    #[test]
    fn unknown_names_are_reported() {
        let registry = ValidatorRegistry::builtin();
        assert_eq!(
            registry.call("Bogus", &Value::I64(1), &[]),
            Err(CallError::Unknown)
        );
    }

    #[test]
    fn dispatch_by_name() {
        let registry = ValidatorRegistry::builtin();
        let range = [Arg::Int64(1), Arg::Int64(10)];
        assert_eq!(registry.call("Range", &Value::I8(1), &range), Ok(()));
        assert_eq!(registry.call("Range", &Value::I32(10), &range), Ok(()));
        assert_eq!(
            registry.call("Range", &Value::I64(0), &range),
            Err(CallError::Rejected)
        );
        assert_eq!(
            registry.call("Range", &Value::I16(11), &range),
            Err(CallError::Rejected)
        );
        assert_eq!(
            registry.call("Min", &Value::Isize(-3), &[Arg::Int64(-3)]),
            Ok(())
        );
        assert_eq!(
            registry.call("Min", &Value::I64(-4), &[Arg::Int64(-3)]),
            Err(CallError::Rejected)
        );
    }

    #[test]
    fn argument_coercion() {
        assert_eq!(Arg::coerce("-7", ArgType::Int64), Some(Arg::Int64(-7)));
        assert_eq!(Arg::coerce("12", ArgType::Int), Some(Arg::Int(12)));
        assert_eq!(Arg::coerce("x", ArgType::Int64), None);
        assert_eq!(
            Arg::coerce(" x", ArgType::String),
            Some(Arg::String(" x".into()))
        );
        assert_eq!(Arg::Int(3).ty(), ArgType::Int);
    }
}
