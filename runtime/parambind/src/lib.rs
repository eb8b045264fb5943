//! Bind decoded query strings and form bodies to typed, validated Rust structs.
//!
//! # Overview
//!
//! Annotate a struct with [`#[derive(Bind)]`](macro@Bind), describe how each field
//! should be looked up, validated and defaulted, then let a [`Binder`] populate it
//! from a key/multi-value mapping:
//!
//! ```rust
//! use parambind::{Bind, Binder, FormValues};
//!
//! #[derive(Bind, Default, Debug)]
//! pub struct Query {
//!     // Looked up under `aaa`, must be between 1 and 10, falls back to 10.
//!     #[bind(params = "aaa;Range(1,10)", default = "10")]
//!     data16: i8,
//!     // Looked up under `data32`, the field name. Required.
//!     data32: i32,
//!     // Left untouched if missing or empty.
//!     #[bind(params = "sss", default = "-")]
//!     string: String,
//!     // `?iii=1,2,3`
//!     #[bind(params = "iii")]
//!     slice_int: Vec<i64>,
//! }
//!
//! let binder = Binder::new();
//! let mut query = Query::default();
//! binder.bind(&mut query, &FormValues::parse("aaa=11&data32=32&iii=1,2,3"))?;
//! assert_eq!(query.data16, 10);
//! assert_eq!(query.data32, 32);
//! assert_eq!(query.string, "");
//! assert_eq!(query.slice_int, vec![1, 2, 3]);
//! # Ok::<(), parambind::BindError>(())
//! ```
//!
//! # Field metadata
//!
//! - `params = "<key>[;Validator(arg,...)]*"`: the input key (the field name if
//!   empty), followed by the validators to run on the converted value.
//!   The built-in validators are listed in [`ValidatorRegistry`].
//! - `default = "<literal>"`: the value to use if conversion or validation fails.
//!   `default = "-"` leaves the field untouched instead. Without a default, a failure
//!   aborts the bind.
//!
//! Supported field types are listed in [`FieldType`].

// Lets the code generated by `#[derive(Bind)]` refer to `::parambind` from within this crate.
extern crate self as parambind;

mod binder;
mod config;
mod convert;
pub mod errors;
mod input;
mod kind;
pub mod plan;
mod record;
pub mod validator;

pub use binder::Binder;
pub use config::BinderConfig;
pub use convert::{DEFAULT_SEQUENCE_DELIMITER, convert};
pub use errors::{BindError, ErrorKind};
pub use input::{FormValues, Input};
pub use kind::{ElemKind, FieldType, Kind, Value};
pub use parambind_macros::Bind;
pub use record::{FieldDef, Record};
pub use validator::ValidatorRegistry;
