//! Lowering `syn::DeriveInput` into the core declaration model.
//!
//! The derive macro is a host for the core pass: it adapts the struct being
//! derived into a [`ClassDecl`] and keeps a side table of field idents, types,
//! and spans so diagnostics and the generated impl can refer back to the
//! source.

use proc_macro2::Span;
use syn::{spanned::Spanned, Data, DeriveInput, Fields, Meta, Result};

use redacted_core::{ClassDecl, ClassKind, PropertyDecl};

use crate::container::ContainerOptions;
use crate::shape::classify_type;

/// Marker identity used for `#[redacted]` in the core configuration.
pub(crate) const REDACTED_MARKER: &str = "redacted";
/// Marker identity used for `#[unredacted]` in the core configuration.
pub(crate) const UNREDACTED_MARKER: &str = "unredacted";

/// Source-side facts about one named field, aligned with the class's
/// property list.
#[derive(Debug)]
pub(crate) struct FieldModel {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: syn::Type,
    pub(crate) span: Span,
}

/// The adapted declaration plus its field side table.
#[derive(Debug)]
pub(crate) struct AdaptedInput {
    pub(crate) class: ClassDecl,
    pub(crate) fields: Vec<FieldModel>,
}

impl AdaptedInput {
    /// Finds the span of a field by property name, for diagnostic placement.
    pub(crate) fn field_span(&self, name: &str) -> Option<Span> {
        self.fields
            .iter()
            .find(|field| field.ident == name)
            .map(|field| field.span)
    }
}

/// Adapts the derive input into the core declaration model.
///
/// Structs become final data classes; enums are adapted as enum declarations
/// so the core pass reports them, and unions are rejected outright.
pub(crate) fn adapt(input: &DeriveInput, options: &ContainerOptions) -> Result<AdaptedInput> {
    let mut class = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(_) | Fields::Unit => ClassDecl::data_class(input.ident.to_string()),
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "`Redacted` requires named fields; tuple structs are not supported",
                ));
            }
        },
        Data::Enum(_) => ClassDecl::new(input.ident.to_string(), ClassKind::Enum),
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Redacted` cannot be derived for unions",
            ));
        }
    };

    if options.redacted.is_some() {
        class = class.annotated(REDACTED_MARKER);
    }
    if options.unredacted.is_some() {
        class = class.annotated(UNREDACTED_MARKER);
    }

    let mut fields = Vec::new();
    if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            for field in &named.named {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
                let markers = parse_field_markers(&field.attrs)?;
                let shape = classify_type(&field.ty, &input.generics);

                let mut property = PropertyDecl::new(ident.to_string(), shape.shape);
                if shape.nullable {
                    property = property.nullable();
                }
                if markers.redacted {
                    property = property.annotated(REDACTED_MARKER);
                }
                if markers.unredacted {
                    property = property.annotated(UNREDACTED_MARKER);
                }
                class = class.with_property(property);
                fields.push(FieldModel {
                    span: ident.span(),
                    ty: field.ty.clone(),
                    ident,
                });
            }
        }
    }

    Ok(AdaptedInput { class, fields })
}

#[derive(Default)]
struct FieldMarkers {
    redacted: bool,
    unredacted: bool,
}

fn parse_field_markers(attrs: &[syn::Attribute]) -> Result<FieldMarkers> {
    let mut markers = FieldMarkers::default();
    for attr in attrs {
        let marker = if attr.path().is_ident("redacted") {
            &mut markers.redacted
        } else if attr.path().is_ident("unredacted") {
            &mut markers.unredacted
        } else {
            continue;
        };
        if !matches!(attr.meta, Meta::Path(_)) {
            return Err(syn::Error::new_spanned(
                attr,
                "field markers take no arguments; `replacement` is a container option",
            ));
        }
        if *marker {
            return Err(syn::Error::new_spanned(attr, "duplicate field marker"));
        }
        *marker = true;
    }
    Ok(markers)
}
