//! Annotation-driven redaction of generated string output.
//!
//! This crate is the host-independent core of a redaction pass. A host (a
//! compiler plugin, a derive macro, a linter) adapts its declarations into
//! the [`ClassDecl`] model and drives two entry points:
//! - [`check_class`] validates marker placement and reports at most one
//!   diagnostic per declaration.
//! - [`generate_to_string`] emits the replacement string-method body as a
//!   [`TokenSequence`] the host lowers to its own string-building primitive.
//!
//! Key rules:
//! - A redacted marker on a class hides every printed property behind one
//!   replacement literal.
//! - A redacted marker on a property hides just that property's value.
//! - A redacted marker inherited through a supertype redacts every property,
//!   overridable per property (or for the whole class) with an unredacted
//!   marker.
//! - Unmarked classes keep their host-synthesized string method untouched.
//!
//! What this crate does:
//! - resolves configured marker identity sets against declarations
//! - plans, validates, and generates deterministically per declaration
//!
//! What it does not do:
//! - parse source, resolve types, or walk supertype graphs for the host
//! - suppress values in logs, `Debug` output, or serialization
//!
//! The `#[derive(Redacted)]` frontend lives in `redacted-derive`.

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
    clippy::struct_excessive_bools,
    clippy::redundant_pub_crate,
    clippy::result_large_err
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod codegen;
mod config;
mod model;
mod pipeline;
mod plan;
mod resolve;
mod validate;

// Re-exports
pub use codegen::{generate, StringToken, TokenSequence, ValueRef};
pub use config::{
    RedactionConfig, DEFAULT_REDACTED_ANNOTATION, DEFAULT_REPLACEMENT_STRING,
    DEFAULT_UNREDACTED_ANNOTATION,
};
pub use model::{AnnotationIdentity, ClassDecl, ClassKind, PropertyDecl, TypeShape};
pub use pipeline::{check_class, generate_to_string};
pub use plan::{plan, PropertyRedaction, RedactionDecision, SupertypeRedaction};
pub use validate::{validate, Diagnostic, DiagnosticCode, SourceLocation};
