use proc_macro::TokenStream;

mod bind;

/// Derive `parambind::Record` for a struct with named fields.
///
/// Each field can carry a `#[bind(...)]` attribute with two optional keys:
///
/// - `params`: `"<key>[;Validator(arg,...)]*"`;
/// - `default`: a literal to fall back to, or `"-"` to leave the field untouched.
///
/// The metadata strings are parsed when the field plan is compiled, at runtime.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive_bind(input)
}
