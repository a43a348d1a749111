//! End-to-end tests for diagnostic reporting through the public API.
//!
//! These tests exercise the integration of:
//! - configuration of marker identity sets,
//! - the ordered legality checks, and
//! - the message text and source location surfaced to the host.

use std::sync::Arc;

use redacted_core::{
    check_class, generate_to_string, AnnotationIdentity, ClassDecl, ClassKind, PropertyDecl,
    RedactionConfig, DiagnosticCode, SourceLocation, TypeShape,
};

const REDACTED: &str = "redacted.annotations.Redacted";
const UNREDACTED: &str = "redacted.annotations.Unredacted";

#[test]
fn test_custom_to_string_conflict() {
    let class = ClassDecl::data_class("Custom")
        .annotated(REDACTED)
        .with_user_to_string()
        .with_property(PropertyDecl::new("a", TypeShape::Scalar));
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(diagnostic.code(), DiagnosticCode::CustomToStringConflict);
    assert_eq!(
        diagnostic.message(),
        "@Redacted is only supported on data or value classes that do *not* have a custom \
         toString() function. Please remove the function or remove the @Redacted annotations."
    );
}

#[test]
fn test_enum_unsupported() {
    let class = ClassDecl::new("Level", ClassKind::Enum).annotated(REDACTED);
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(diagnostic.code(), DiagnosticCode::EnumUnsupported);
    assert_eq!(
        diagnostic.location(),
        &SourceLocation::Class {
            class: "Level".to_owned()
        }
    );
}

#[test]
fn test_plain_class_rejected() {
    let class = ClassDecl::new("Plain", ClassKind::Class)
        .annotated(REDACTED)
        .with_property(PropertyDecl::new("a", TypeShape::Scalar));
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(diagnostic.code(), DiagnosticCode::NotDataOrValueClass);
    assert_eq!(
        diagnostic.message(),
        "@Redacted is only supported on data or value classes!"
    );
}

#[test]
fn test_multiple_targets_message_enumerates_sites() {
    let base = Arc::new(ClassDecl::new("Base", ClassKind::Interface).annotated(REDACTED));
    let class = ClassDecl::data_class("Conflicted")
        .annotated(REDACTED)
        .with_supertype(base)
        .with_property(PropertyDecl::new("ssn", TypeShape::Scalar).annotated(REDACTED));
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(diagnostic.code(), DiagnosticCode::MultipleRedactionTargets);
    assert_eq!(
        diagnostic.message(),
        "@Redacted detected on multiple targets:\nclass: 'Conflicted'\nproperties: \
         'ssn'\nsupertype: Base"
    );
    assert_eq!(
        diagnostic.location(),
        &SourceLocation::Annotation {
            class: "Conflicted".to_owned(),
            annotation: AnnotationIdentity::new(REDACTED),
        }
    );
}

#[test]
fn test_alias_short_name_appears_in_messages() {
    let config = RedactionConfig::new().with_redacted_annotation("com.example.Hidden");
    let class = ClassDecl::new("Level", ClassKind::Enum).annotated("com.example.Hidden");
    let diagnostic = check_class(&class, &config).unwrap_err();
    assert_eq!(
        diagnostic.message(),
        "@Hidden does not support enum classes or entries!"
    );
}

#[test]
fn test_value_class_with_redacted_supertype_is_redundant() {
    let base = Arc::new(ClassDecl::new("Base", ClassKind::Interface).annotated(REDACTED));
    let class = ClassDecl::value_class("Wrapper")
        .with_supertype(base)
        .with_property(PropertyDecl::new("ssn", TypeShape::Scalar));
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(
        diagnostic.code(),
        DiagnosticCode::RedundantOnValueClassProperty
    );
}

#[test]
fn test_unredacted_property_without_context() {
    let class = ClassDecl::data_class("Orphan")
        .with_property(PropertyDecl::new("ssn", TypeShape::Scalar).annotated(REDACTED))
        .with_property(PropertyDecl::new("name", TypeShape::Scalar).annotated(UNREDACTED));
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(
        diagnostic.code(),
        DiagnosticCode::UnredactedPropertyWithoutContext
    );
}

#[test]
fn test_unredacted_only_property_is_a_no_op() {
    // A property-level unredacted marker alone never opens the gate; the
    // class keeps its default untouched.
    let class = ClassDecl::data_class("Orphan")
        .with_property(PropertyDecl::new("name", TypeShape::Scalar).annotated(UNREDACTED));
    let config = RedactionConfig::new();
    assert!(check_class(&class, &config).is_ok());
    assert!(generate_to_string(&class, &config).is_none());
}

#[test]
fn test_first_failure_wins() {
    // An enum with a custom override reports the override conflict only.
    let class = ClassDecl::new("Weird", ClassKind::Enum)
        .annotated(REDACTED)
        .with_user_to_string();
    let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
    assert_eq!(diagnostic.code(), DiagnosticCode::CustomToStringConflict);
}

#[test]
fn test_rejected_class_still_generates_when_asked() {
    // Generation is gated only on markers being present; hosts that ignore
    // a reported diagnostic still get a well-formed body.
    let class = ClassDecl::data_class("Doubled")
        .annotated(REDACTED)
        .with_property(PropertyDecl::new("ssn", TypeShape::Scalar).annotated(REDACTED));
    let config = RedactionConfig::new();
    assert!(check_class(&class, &config).is_err());
    assert!(generate_to_string(&class, &config).is_some());
}
