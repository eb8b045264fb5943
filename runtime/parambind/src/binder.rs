use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::BinderConfig;
use crate::convert::convert_with;
use crate::errors::{
    BindError, InvalidFuncError, InvalidFuncReason, InvalidParamError, InvalidParamReason,
    ObjTypeError,
};
use crate::input::Input;
use crate::kind::Value;
use crate::plan::{self, DefaultMode, FieldPlan, PlanEntry};
use crate::record::Record;
use crate::validator::{CallError, ValidatorRegistry};

/// Populate [`Record`]s from decoded key/value mappings.
///
/// # Example
///
/// ```rust
/// use parambind::{Bind, Binder, FormValues};
///
/// #[derive(Bind, Default, Debug, PartialEq)]
/// pub struct Listing {
///     #[bind(params = "id;Min(1)")]
///     id: i64,
///     #[bind(params = "size;Range(1,100)", default = "20")]
///     page_size: i32,
///     #[bind(params = "sort", default = "-")]
///     sort: String,
/// }
///
/// let binder = Binder::new();
/// let mut listing = Listing { sort: "newest".into(), ..Default::default() };
/// binder
///     .bind(&mut listing, &FormValues::parse("id=7&size=500"))
///     .unwrap();
/// assert_eq!(
///     listing,
///     Listing { id: 7, page_size: 20, sort: "newest".into() }
/// );
/// ```
///
/// # Field plans
///
/// The first time a record type is bound (or when it is explicitly
/// [registered](Binder::register)), the binder compiles its field metadata into
/// a [`FieldPlan`] and caches it for the lifetime of the binder.
/// Metadata errors (e.g. an unknown validator) surface at that point.
///
/// # Failures
///
/// Fields are processed in declaration order. When a field fails conversion or
/// validation, its `default` metadata decides what happens:
///
/// - no default: the bind stops and returns the error. Fields processed earlier
///   keep the values that were written;
/// - `default = "-"`: the field is left untouched;
/// - `default = "<literal>"`: the (pre-converted) literal is written into the field.
///
/// A field is never partially written.
///
/// # Concurrency
///
/// A `Binder` can be shared across threads: the plan cache sits behind a
/// reader/writer lock and plans are immutable once published.
/// Two threads racing to compile the plan for the same type will both compile it;
/// the last one to finish overwrites an equivalent entry.
#[derive(Debug, Default)]
pub struct Binder {
    registry: ValidatorRegistry,
    config: BinderConfig,
    plans: RwLock<HashMap<TypeId, CachedPlan>>,
}

/// A type-erased [`FieldPlan`], along with the monomorphized entry point
/// used by [`Binder::bind_dyn`].
#[derive(Clone)]
struct CachedPlan {
    plan: Arc<dyn Any + Send + Sync>,
    bind: fn(&Binder, &mut dyn Any, &dyn Input) -> Result<(), BindError>,
}

impl std::fmt::Debug for CachedPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedPlan").finish_non_exhaustive()
    }
}

impl Binder {
    /// A binder with the built-in validators, the default configuration and
    /// an empty plan cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BinderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Compile and cache the field plan for `R` ahead of the first bind.
    ///
    /// It returns the first compilation error, if any. It returns `&Self` on success,
    /// so that several types can be registered in one go:
    ///
    /// ```rust
    /// use parambind::{Bind, Binder};
    ///
    /// #[derive(Bind)]
    /// pub struct A { x: i64 }
    /// #[derive(Bind)]
    /// pub struct B { #[bind(params = "y;Length(1,8)")] y: String }
    ///
    /// let binder = Binder::new();
    /// binder.register::<A>()?.register::<B>()?;
    /// # Ok::<(), parambind::BindError>(())
    /// ```
    pub fn register<R: Record>(&self) -> Result<&Self, BindError> {
        self.compile::<R>()?;
        Ok(self)
    }

    /// The field plan for `R`, compiling it if it isn't cached yet.
    pub fn plan<R: Record>(&self) -> Result<Arc<FieldPlan<R>>, BindError> {
        let cached = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<R>())
            .cloned();
        match cached.and_then(|c| c.plan.downcast::<FieldPlan<R>>().ok()) {
            Some(plan) => Ok(plan),
            None => self.compile::<R>(),
        }
    }

    fn compile<R: Record>(&self) -> Result<Arc<FieldPlan<R>>, BindError> {
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        let plan = Arc::new(plan::compile::<R>(
            &self.registry,
            self.config.sequence_delimiter,
        )?);
        plans.insert(
            TypeId::of::<R>(),
            CachedPlan {
                plan: plan.clone(),
                bind: bind_erased::<R>,
            },
        );
        Ok(plan)
    }

    /// Populate `record` from `input`, following the field plan of `R`.
    ///
    /// See the [type-level documentation](Binder#failures) for the failure semantics.
    pub fn bind<R, I>(&self, record: &mut R, input: &I) -> Result<(), BindError>
    where
        R: Record,
        I: Input + ?Sized,
    {
        let plan = self.plan::<R>()?;
        self.bind_with(&plan, record, input)
    }

    /// Same as [`Binder::bind`], for a record whose type is only known at runtime.
    ///
    /// The concrete type of `record` must have been registered (or bound) with this
    /// binder beforehand; otherwise an [`ObjTypeError`] is returned.
    pub fn bind_dyn(&self, record: &mut dyn Any, input: &dyn Input) -> Result<(), BindError> {
        let type_id = (*record).type_id();
        let bind = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .map(|c| c.bind)
            .ok_or(ObjTypeError { type_id })?;
        bind(self, record, input)
    }

    fn bind_with<R, I>(
        &self,
        plan: &FieldPlan<R>,
        record: &mut R,
        input: &I,
    ) -> Result<(), BindError>
    where
        R: Record,
        I: Input + ?Sized,
    {
        for entry in plan.entries() {
            match self.process(entry, input) {
                Ok(value) => (entry.set)(record, value),
                Err(e) => match &entry.default {
                    DefaultMode::None => {
                        tracing::debug!(
                            field = entry.field,
                            key = entry.key,
                            error.msg = %e,
                            "Aborting bind"
                        );
                        return Err(e);
                    }
                    DefaultMode::Omit => {
                        tracing::trace!(
                            field = entry.field,
                            key = entry.key,
                            error.msg = %e,
                            "Leaving field untouched"
                        );
                    }
                    DefaultMode::Value(value) => {
                        tracing::trace!(
                            field = entry.field,
                            key = entry.key,
                            error.msg = %e,
                            "Falling back to the default value"
                        );
                        (entry.set)(record, value.clone());
                    }
                },
            }
        }
        Ok(())
    }

    /// Convert and validate the input for a single field, without writing it.
    fn process<R, I>(&self, entry: &PlanEntry<R>, input: &I) -> Result<Value, BindError>
    where
        R: Record,
        I: Input + ?Sized,
    {
        let record = std::any::type_name::<R>();
        let invalid_param = |reason: InvalidParamReason| InvalidParamError {
            record,
            field: entry.field,
            key: entry.key.to_owned(),
            reason,
        };

        let raw = input.first(entry.key).unwrap_or_default();
        let value = convert_with(raw, entry.kind, self.config.sequence_delimiter)
            .map_err(|e| invalid_param(InvalidParamReason::Conversion(e)))?;
        for call in entry.validators() {
            match self.registry.call(call.name, &value, &call.args) {
                Ok(()) => {}
                Err(CallError::Rejected) => {
                    return Err(invalid_param(InvalidParamReason::Rejected {
                        validator: call.name.to_owned(),
                    })
                    .into());
                }
                Err(CallError::Unknown) => {
                    return Err(InvalidFuncError {
                        record,
                        field: entry.field,
                        reason: InvalidFuncReason::UnknownValidator {
                            name: call.name.to_owned(),
                        },
                    }
                    .into());
                }
            }
        }
        Ok(value)
    }
}

fn bind_erased<R: Record>(
    binder: &Binder,
    record: &mut dyn Any,
    input: &dyn Input,
) -> Result<(), BindError> {
    let record = record.downcast_mut::<R>().ok_or(ObjTypeError {
        type_id: TypeId::of::<R>(),
    })?;
    binder.bind(record, input)
}
