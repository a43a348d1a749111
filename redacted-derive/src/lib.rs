//! Derive macro frontend for `redacted-core`.
//!
//! This crate generates the `Display` implementation behind
//! `#[derive(Redacted)]`. It:
//! - reads `#[redacted]` and `#[unredacted]` markers on the struct and fields
//! - runs the core validation pass and reports its diagnostic as a compile
//!   error at the offending item
//! - lowers the core's token sequence into `core::fmt::Display`
//!
//! It does **not** decide what gets redacted. That logic lives in
//! `redacted-core` and is shared with any other host of the pass.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::cargo_common_metadata,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput, Result};

use redacted_core::{
    check_class, generate, plan, Diagnostic, RedactionConfig, SourceLocation,
};

mod adapter;
mod container;
mod lower;
mod shape;
use adapter::{adapt, AdaptedInput, REDACTED_MARKER, UNREDACTED_MARKER};
use container::{parse_container_options, ContainerOptions};
use lower::lower_display_impl;

/// Derives a redacting `core::fmt::Display` implementation for structs with
/// named fields.
///
/// The output mirrors the conventional derived debug shape,
/// `Name(field=value, ...)`, with redacted values replaced by `██`.
///
/// # Container Attributes
///
/// - `#[redacted]` - Redact every field; the whole body collapses to a single
///   replacement literal.
/// - `#[redacted(replacement = "...")]` - Override the replacement literal.
///   This only configures the output and does not redact anything by itself.
///
/// # Field Attributes
///
/// - **No annotation**: The field's value is printed through `Display`
///   (`Debug` for `Vec`, slice, and array types; `Option` fields print `null`
///   when absent).
/// - `#[redacted]`: The field's value is replaced by the replacement literal.
/// - `#[unredacted]`: Keeps the field visible under a container-level
///   `#[redacted]`.
///
/// Marker placement is validated: redundant, conflicting, or out-of-context
/// markers are compile errors. Enums, unions, and tuple structs are rejected.
#[proc_macro_derive(Redacted, attributes(redacted, unredacted))]
pub fn derive_redacted(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let options = parse_container_options(&input.attrs)?;
    let adapted = adapt(&input, &options)?;

    let mut config = RedactionConfig::new()
        .with_redacted_annotation(REDACTED_MARKER)
        .with_unredacted_annotation(UNREDACTED_MARKER);
    if let Some(replacement) = &options.replacement {
        config = config.with_replacement_string(replacement.clone());
    }

    if let Err(diagnostic) = check_class(&adapted.class, &config) {
        return Err(diagnostic_error(&input, &options, &adapted, &diagnostic));
    }

    // An unmarked enum sails through validation as a no-op; there is still
    // nothing sensible to generate for it.
    if matches!(input.data, Data::Enum(_)) {
        return Err(syn::Error::new(
            input.ident.span(),
            "`Redacted` can only be derived for structs",
        ));
    }

    let decision = plan(&adapted.class, &config);
    let sequence = generate(&adapted.class, &decision, config.replacement_string());
    lower_display_impl(&input.ident, &input.generics, &sequence, &adapted.fields)
}

/// Maps a core diagnostic back to the most specific source span available.
fn diagnostic_error(
    input: &DeriveInput,
    options: &ContainerOptions,
    adapted: &AdaptedInput,
    diagnostic: &Diagnostic,
) -> syn::Error {
    let span = match diagnostic.location() {
        SourceLocation::Property { property, .. } => adapted.field_span(property),
        SourceLocation::Annotation { annotation, .. } => match annotation.as_str() {
            REDACTED_MARKER => options.redacted,
            UNREDACTED_MARKER => options.unredacted,
            _ => None,
        },
        SourceLocation::Class { .. } | SourceLocation::Supertype { .. } => None,
    };
    syn::Error::new(
        span.unwrap_or_else(|| input.ident.span()),
        diagnostic.message(),
    )
}
