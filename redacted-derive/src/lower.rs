//! Lowering the core token sequence into a `Display` implementation.
//!
//! Each literal token becomes a `write_str` call and each value token becomes
//! a `Display::fmt` or `Debug::fmt` call on the field, chosen by the field's
//! type shape. Nullable fields match on the `Option` and print `null` when
//! absent.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Ident};

use redacted_core::{StringToken, TokenSequence, TypeShape, ValueRef};

use crate::adapter::FieldModel;

/// Emits the full `impl Display` for the derived type.
pub(crate) fn lower_display_impl(
    ident: &Ident,
    generics: &syn::Generics,
    sequence: &TokenSequence,
    fields: &[FieldModel],
) -> syn::Result<TokenStream> {
    let mut statements = Vec::new();
    let mut display_bound = Vec::new();
    let mut debug_bound = Vec::new();

    for token in sequence.tokens() {
        match token {
            StringToken::Literal(literal) => {
                statements.push(quote! { f.write_str(#literal)?; });
            }
            StringToken::Value(value) => {
                let field = fields
                    .iter()
                    .find(|field| field.ident == value.name())
                    .ok_or_else(|| {
                        syn::Error::new(
                            ident.span(),
                            format!("no field named `{}`", value.name()),
                        )
                    })?;
                statements.push(value_statement(value, field));
                match value.shape() {
                    TypeShape::ReferenceArray | TypeShape::PrimitiveArray => {
                        collect_generics_from_type(&field.ty, generics, &mut debug_bound);
                    }
                    TypeShape::Scalar | TypeShape::Generic => {
                        collect_generics_from_type(&field.ty, generics, &mut display_bound);
                    }
                }
            }
        }
    }

    let bounded = add_format_bounds(generics.clone(), &display_bound, &debug_bound);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::core::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn value_statement(value: &ValueRef, field: &FieldModel) -> TokenStream {
    let ident = &field.ident;
    let fmt_trait = match value.shape() {
        // Arrays print elementwise content, which `Display` cannot provide.
        TypeShape::ReferenceArray | TypeShape::PrimitiveArray => quote!(::core::fmt::Debug),
        TypeShape::Scalar | TypeShape::Generic => quote!(::core::fmt::Display),
    };
    if value.is_nullable() {
        quote! {
            match &self.#ident {
                ::core::option::Option::Some(value) => #fmt_trait::fmt(value, f)?,
                ::core::option::Option::None => f.write_str("null")?,
            }
        }
    } else {
        quote! { #fmt_trait::fmt(&self.#ident, f)?; }
    }
}

/// Collects the container's generic parameters referenced by a printed
/// field's type, so bounds are added only where the impl actually formats.
fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }
            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
    }
}

fn add_format_bounds(
    mut generics: syn::Generics,
    display_bound: &[Ident],
    debug_bound: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if display_bound.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Display));
        }
        if debug_bound.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Debug));
        }
    }
    generics
}
