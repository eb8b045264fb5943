//! The plan compiler: turns the field descriptors of a [`Record`] into a [`FieldPlan`].
//!
//! All metadata parsing, validator resolution and default conversion happens here,
//! once per record type, so that binding never has to look at a metadata string.
use std::fmt;

use crate::convert::convert_with;
use crate::errors::{
    BindError, InvalidFuncError, InvalidFuncReason, InvalidParamError, InvalidParamReason,
};
use crate::kind::{Kind, Value};
use crate::record::{FieldDef, Record};
use crate::validator::{Arg, ValidatorRegistry};

mod metadata;

/// The `default` metadata value meaning "leave the field untouched on failure".
pub const OMIT: &str = "-";

/// The compiled binding instructions for a [`Record`], one entry per field,
/// in declaration order.
///
/// Plans are immutable; a [`Binder`](crate::Binder) caches one per record type.
pub struct FieldPlan<R> {
    entries: Vec<PlanEntry<R>>,
}

impl<R> FieldPlan<R> {
    pub fn entries(&self) -> &[PlanEntry<R>] {
        &self.entries
    }
}

impl<R> fmt::Debug for FieldPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

/// The compiled binding instructions for a single field.
pub struct PlanEntry<R> {
    pub(crate) field: &'static str,
    pub(crate) key: &'static str,
    pub(crate) kind: Kind,
    pub(crate) validators: Vec<ValidatorCall>,
    pub(crate) default: DefaultMode,
    pub(crate) set: fn(&mut R, Value),
}

impl<R> PlanEntry<R> {
    /// The declared name of the field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The input key the field is bound to.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn validators(&self) -> &[ValidatorCall] {
        &self.validators
    }

    pub fn default_mode(&self) -> &DefaultMode {
        &self.default
    }
}

impl<R> fmt::Debug for PlanEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanEntry")
            .field("field", &self.field)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("validators", &self.validators)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// A resolved validator invocation, with its arguments already coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCall {
    pub(crate) name: &'static str,
    pub(crate) args: Vec<Arg>,
}

impl ValidatorCall {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

/// What to do when a field fails conversion or validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultMode {
    /// Abort the bind and return the error.
    None,
    /// Leave the field untouched and move on.
    Omit,
    /// Write this value into the field and move on.
    Value(Value),
}

#[tracing::instrument(
    name = "Compile field plan",
    level = "debug",
    skip_all,
    fields(record = std::any::type_name::<R>())
)]
pub(crate) fn compile<R: Record>(
    registry: &ValidatorRegistry,
    delimiter: char,
) -> Result<FieldPlan<R>, BindError> {
    let record = std::any::type_name::<R>();
    let entries = R::fields()
        .into_iter()
        .map(|def| compile_entry(record, def, registry, delimiter))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(n_fields = entries.len(), "Compiled field plan");
    Ok(FieldPlan { entries })
}

fn compile_entry<R>(
    record: &'static str,
    def: FieldDef<R>,
    registry: &ValidatorRegistry,
    delimiter: char,
) -> Result<PlanEntry<R>, BindError> {
    let field = def.name;
    let invalid_func = |reason: InvalidFuncReason| InvalidFuncError {
        record,
        field,
        reason,
    };

    let meta = metadata::parse_params(def.params.unwrap_or_default()).map_err(invalid_func)?;
    let key = meta.key.unwrap_or(def.name);

    let mut validators = Vec::with_capacity(meta.calls.len());
    for call in meta.calls {
        let validator = registry.get(call.name).ok_or_else(|| {
            invalid_func(InvalidFuncReason::UnknownValidator {
                name: call.name.to_owned(),
            })
        })?;
        if call.args.len() != validator.arity() {
            return Err(invalid_func(InvalidFuncReason::ArityMismatch {
                name: call.name.to_owned(),
                expected: validator.arity(),
                actual: call.args.len(),
            })
            .into());
        }
        let args = call
            .args
            .iter()
            .zip(validator.params())
            .enumerate()
            .map(|(position, (raw, ty))| {
                Arg::coerce(raw, *ty).ok_or_else(|| {
                    invalid_func(InvalidFuncReason::InvalidArgument {
                        name: call.name.to_owned(),
                        position,
                        raw: (*raw).to_owned(),
                        expected: *ty,
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        validators.push(ValidatorCall {
            name: validator.name(),
            args,
        });
    }

    let default = match def.default {
        None | Some("") => DefaultMode::None,
        Some(OMIT) => DefaultMode::Omit,
        Some(literal) => match convert_with(literal, def.kind, delimiter) {
            Ok(value) => DefaultMode::Value(value),
            Err(e) => {
                return Err(InvalidParamError {
                    record,
                    field: def.name,
                    key: key.to_owned(),
                    reason: InvalidParamReason::InvalidDefault {
                        literal: literal.to_owned(),
                        kind: def.kind,
                        source: e,
                    },
                }
                .into());
            }
        },
    };

    Ok(PlanEntry {
        field: def.name,
        key,
        kind: def.kind,
        validators,
        default,
        set: def.set,
    })
}
