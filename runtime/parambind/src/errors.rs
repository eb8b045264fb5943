//! Errors that can happen when compiling a field plan or binding a record.
use std::any::TypeId;

use crate::kind::Kind;
use crate::validator::ArgType;

/// The error returned by [`Binder::bind`], [`Binder::bind_dyn`] and [`Binder::register`].
///
/// Each variant wraps a dedicated error type, carrying the details of the failure.
/// Use [`BindError::kind`] if you only care about the failure family.
///
/// [`Binder::bind`]: crate::Binder::bind
/// [`Binder::bind_dyn`]: crate::Binder::bind_dyn
/// [`Binder::register`]: crate::Binder::register
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BindError {
    #[error(transparent)]
    /// See [`ObjTypeError`] for details.
    ObjType(#[from] ObjTypeError),
    #[error(transparent)]
    /// See [`InvalidFuncError`] for details.
    InvalidFunc(#[from] InvalidFuncError),
    #[error(transparent)]
    /// See [`InvalidParamError`] for details.
    InvalidParam(#[from] InvalidParamError),
}

impl BindError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::ObjType(_) => ErrorKind::ObjType,
            BindError::InvalidFunc(_) => ErrorKind::InvalidFunc,
            BindError::InvalidParam(_) => ErrorKind::InvalidParam,
        }
    }
}

/// The failure families of [`BindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target is not a record the binder knows about.
    ObjType,
    /// The `params` metadata of a field references a validator incorrectly.
    InvalidFunc,
    /// A value failed conversion or validation.
    InvalidParam,
}

#[derive(Debug, thiserror::Error)]
#[error("The target of a dynamic bind is not a registered record type ({type_id:?})")]
/// [`Binder::bind_dyn`] was given a value whose type was never registered with the binder.
///
/// [`Binder::bind_dyn`]: crate::Binder::bind_dyn
pub struct ObjTypeError {
    pub type_id: TypeId,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid validator for field `{field}` of `{record}`: {reason}")]
/// The `params` metadata of a field can't be turned into a list of validator calls.
pub struct InvalidFuncError {
    /// The type name of the record.
    pub record: &'static str,
    /// The declared name of the offending field.
    pub field: &'static str,
    pub reason: InvalidFuncReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidFuncReason {
    #[error("`{name}` is not a registered validator")]
    UnknownValidator { name: String },
    #[error("`{segment}` is not of the form `Name(arg, ...)`")]
    Malformed { segment: String },
    #[error("`{name}` expects {expected} argument(s), but {actual} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("argument #{position} of `{name}` must be {expected}, but it is `{raw}`")]
    InvalidArgument {
        name: String,
        position: usize,
        raw: String,
        expected: ArgType,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid value for `{key}` (field `{field}` of `{record}`): {reason}")]
/// A value could not be bound to a field.
pub struct InvalidParamError {
    /// The type name of the record.
    pub record: &'static str,
    /// The declared name of the offending field.
    pub field: &'static str,
    /// The input key the field is bound to.
    pub key: String,
    pub reason: InvalidParamReason,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidParamReason {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("rejected by `{validator}`")]
    Rejected { validator: String },
    #[error("the default `{literal}` is not a valid `{kind}`: {source}")]
    InvalidDefault {
        literal: String,
        kind: Kind,
        source: ConversionError,
    },
}

/// The scalar converter couldn't turn a textual value into a value of the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("the value is empty")]
    Empty,
    #[error("`{raw}` is not a valid `{kind}`")]
    Malformed { raw: String, kind: Kind },
    #[error("element #{index} of the sequence is invalid: {source}")]
    Element {
        index: usize,
        source: Box<ConversionError>,
    },
}
