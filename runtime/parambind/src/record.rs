use crate::kind::{Kind, Value};

/// A struct whose fields can be populated by a [`Binder`](crate::Binder).
///
/// You don't implement this trait by hand, usually: derive it with
/// [`#[derive(Bind)]`](macro@crate::Bind).
///
/// # Example
///
/// ```rust
/// use parambind::Bind;
///
/// #[derive(Bind, Default)]
/// pub struct Search {
///     // Bound to the `q` key, must be 1 to 64 characters long.
///     #[bind(params = "q;Length(1,64)")]
///     query: String,
///     // Bound to the `page` key; falls back to 1 if missing or invalid.
///     #[bind(params = "page;Min(1)", default = "1")]
///     page: i64,
///     // Bound to the `tags` key; left untouched if missing or invalid.
///     #[bind(params = "tags", default = "-")]
///     tags: Vec<String>,
/// }
/// ```
pub trait Record: 'static {
    /// The descriptors of the bindable fields, in declaration order.
    fn fields() -> Vec<FieldDef<Self>>
    where
        Self: Sized;
}

/// Everything the plan compiler needs to know about one field of a [`Record`].
pub struct FieldDef<R> {
    pub(crate) name: &'static str,
    pub(crate) kind: Kind,
    pub(crate) params: Option<&'static str>,
    pub(crate) default: Option<&'static str>,
    pub(crate) set: fn(&mut R, Value),
}

impl<R> FieldDef<R> {
    /// A field named `name`, of the given `kind`.
    ///
    /// `set` writes a value of that kind into the field.
    pub fn new(name: &'static str, kind: Kind, set: fn(&mut R, Value)) -> Self {
        Self {
            name,
            kind,
            params: None,
            default: None,
            set,
        }
    }

    /// Attach the `params` metadata: `"<key>[;Validator(arg,...)]*"`.
    pub fn params(mut self, params: &'static str) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach the `default` metadata: a literal, or `-` to leave the field untouched.
    pub fn default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}
