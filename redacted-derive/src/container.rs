//! Container-level attribute parsing for `#[derive(Redacted)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.
//! A bare `#[redacted]` or `#[unredacted]` marks the container;
//! `#[redacted(replacement = "...")]` only configures the replacement string
//! and does not mark anything by itself.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Options parsed from container-level attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Span of a bare `#[redacted]` marker, if present.
    pub(crate) redacted: Option<Span>,
    /// Span of a bare `#[unredacted]` marker, if present.
    pub(crate) unredacted: Option<Span>,
    /// Replacement string override from `#[redacted(replacement = "...")]`.
    pub(crate) replacement: Option<String>,
}

/// Parses container-level `#[redacted]` and `#[unredacted]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if attr.path().is_ident("unredacted") {
            match &attr.meta {
                Meta::Path(_) => {
                    if options.unredacted.is_none() {
                        options.unredacted = Some(attr.span());
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "#[unredacted] takes no arguments",
                    ));
                }
            }
            continue;
        }
        if !attr.path().is_ident("redacted") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                if options.redacted.is_none() {
                    options.redacted = Some(attr.span());
                }
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("replacement") {
                        let value: LitStr = meta.value()?.parse()?;
                        if options.replacement.is_some() {
                            return Err(meta.error("duplicate `replacement` option"));
                        }
                        options.replacement = Some(value.value());
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `replacement`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[redacted]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let options = parse_container_options(&parse_attrs(quote! {})).unwrap();
        assert!(options.redacted.is_none());
        assert!(options.unredacted.is_none());
        assert!(options.replacement.is_none());
    }

    #[test]
    fn bare_redacted_marks_the_container() {
        let options = parse_container_options(&parse_attrs(quote! { #[redacted] })).unwrap();
        assert!(options.redacted.is_some());
    }

    #[test]
    fn bare_unredacted_marks_the_container() {
        let options = parse_container_options(&parse_attrs(quote! { #[unredacted] })).unwrap();
        assert!(options.unredacted.is_some());
    }

    #[test]
    fn replacement_configures_without_marking() {
        let options =
            parse_container_options(&parse_attrs(quote! { #[redacted(replacement = "XXX")] }))
                .unwrap();
        assert!(options.redacted.is_none());
        assert_eq!(options.replacement.as_deref(), Some("XXX"));
    }

    #[test]
    fn marker_and_replacement_combine_across_attributes() {
        let options = parse_container_options(&parse_attrs(quote! {
            #[redacted]
            #[redacted(replacement = "<redacted>")]
        }))
        .unwrap();
        assert!(options.redacted.is_some());
        assert_eq!(options.replacement.as_deref(), Some("<redacted>"));
    }

    #[test]
    fn unknown_option_errors() {
        let result = parse_container_options(&parse_attrs(quote! { #[redacted(unknown)] }));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn unredacted_with_arguments_errors() {
        let result = parse_container_options(&parse_attrs(quote! { #[unredacted(anything)] }));
        assert!(result.unwrap_err().to_string().contains("no arguments"));
    }
}
