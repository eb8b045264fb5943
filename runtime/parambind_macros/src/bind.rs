use darling::{FromDeriveInput, FromField, util::Ignored};
use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, Ident, Type, ext::IdentExt, parse_macro_input, spanned::Spanned};

#[derive(FromDeriveInput)]
#[darling(supports(struct_named))]
struct BindInput {
    ident: Ident,
    generics: syn::Generics,
    data: darling::ast::Data<Ignored, BindField>,
}

// Nested meta for `#[bind(params = "...", default = "...")]`
#[derive(FromField)]
#[darling(attributes(bind))]
struct BindField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    params: Option<String>,
    #[darling(default, rename = "default")]
    default_value: Option<String>,
}

pub(super) fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_bind(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_bind(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    let input = BindInput::from_derive_input(&input)?;
    reject_generics(&input)?;

    let struct_ident = &input.ident;
    let fields = input
        .data
        .take_struct()
        // Unsupported shapes are rejected by `darling` via `supports(struct_named)`.
        .expect("`Bind` only supports structs with named fields.");

    let defs = fields
        .iter()
        .map(|field| {
            let ident = field.ident.as_ref().ok_or_else(|| {
                darling::Error::custom("Expected a named field").with_span(&field.ty)
            })?;
            Ok(field_def(ident, field))
        })
        .collect::<Result<Vec<_>, darling::Error>>()?;

    Ok(quote! {
        #[automatically_derived]
        impl ::parambind::Record for #struct_ident {
            fn fields() -> ::std::vec::Vec<::parambind::FieldDef<Self>> {
                ::std::vec![
                    #(#defs),*
                ]
            }
        }
    })
}

fn field_def(ident: &Ident, field: &BindField) -> proc_macro2::TokenStream {
    let name = ident.unraw().to_string();
    let ty = &field.ty;
    let ty_span = ty.span();
    let params = field.params.as_ref().map(|p| quote! { .params(#p) });
    let default = field.default_value.as_ref().map(|d| quote! { .default(#d) });
    quote_spanned! { ty_span =>
        ::parambind::FieldDef::new(
            #name,
            <#ty as ::parambind::FieldType>::KIND,
            |record: &mut Self, value: ::parambind::Value| {
                if let ::std::option::Option::Some(value) =
                    <#ty as ::parambind::FieldType>::from_value(value)
                {
                    record.#ident = value;
                }
            },
        )
        #params
        #default
    }
}

fn reject_generics(input: &BindInput) -> Result<(), darling::Error> {
    let struct_ident = &input.ident;
    if let Some(generic) = input.generics.type_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with generic type parameters, such as `{struct_ident}`.\n\n\
            help: Use concrete field types. Only the types implementing `parambind::FieldType` can be bound.",
        ))
        .with_span(generic));
    }
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with generic lifetimes, such as `{struct_ident}`.\n\n\
            help: Bound fields own their values. Use `String` instead of `&str`.",
        ))
        .with_span(lifetime));
    }
    if let Some(constant) = input.generics.const_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with const generic parameters, such as `{struct_ident}`.",
        ))
        .with_span(constant));
    }
    Ok(())
}
