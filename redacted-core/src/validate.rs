//! Structural legality checks for a planned redaction decision.
//!
//! Checks run in a fixed order and the first failing check wins: the order is
//! a design contract, because it determines which single diagnostic a user
//! sees when several issues exist at once. Failures are returned values, not
//! panics, and a failure for one declaration never affects its siblings.

use std::fmt;

use thiserror::Error;

use crate::model::{AnnotationIdentity, ClassDecl, ClassKind};
use crate::plan::RedactionDecision;

/// Stable identifiers for every diagnostic the validator can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// The class declares its own string-conversion override.
    CustomToStringConflict,
    /// Redaction applied to an enum class or enum entry.
    EnumUnsupported,
    /// Redaction applied to a final class that is neither data nor value.
    NotDataOrValueClass,
    /// Property-level redaction used on a single-field value type.
    RedundantOnValueClassProperty,
    /// A direct redacted marker on an object declaration.
    UselessOnObject,
    /// An unredacted marker on an object declaration.
    UnredactedUselessOnObject,
    /// Redacted and unredacted markers on the same class.
    RedactedAndUnredactedOnSameClass,
    /// An unredacted class without a redacted supertype.
    UnredactedWithoutRedactedSupertype,
    /// An unredacted property without class- or supertype-level redaction.
    UnredactedPropertyWithoutContext,
    /// More or fewer than exactly one redaction source of truth.
    MultipleRedactionTargets,
}

impl DiagnosticCode {
    /// The stable error-code string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomToStringConflict => "CustomToStringConflict",
            Self::EnumUnsupported => "EnumUnsupported",
            Self::NotDataOrValueClass => "NotDataOrValueClass",
            Self::RedundantOnValueClassProperty => "RedundantOnValueClassProperty",
            Self::UselessOnObject => "UselessOnObject",
            Self::UnredactedUselessOnObject => "UnredactedUselessOnObject",
            Self::RedactedAndUnredactedOnSameClass => "RedactedAndUnredactedOnSameClass",
            Self::UnredactedWithoutRedactedSupertype => "UnredactedWithoutRedactedSupertype",
            Self::UnredactedPropertyWithoutContext => "UnredactedPropertyWithoutContext",
            Self::MultipleRedactionTargets => "MultipleRedactionTargets",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most specific source location a diagnostic can be attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    /// The class declaration name.
    Class {
        /// Class name.
        class: String,
    },
    /// A property declaration inside the class.
    Property {
        /// Enclosing class name.
        class: String,
        /// Property name.
        property: String,
    },
    /// A specific annotation on the class.
    Annotation {
        /// Enclosing class name.
        class: String,
        /// The offending annotation.
        annotation: AnnotationIdentity,
    },
    /// A supertype reference of the class.
    Supertype {
        /// Enclosing class name.
        class: String,
        /// The referenced supertype name.
        supertype: String,
    },
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { class } => write!(f, "{class}"),
            Self::Property { class, property } => write!(f, "{class}.{property}"),
            Self::Annotation { class, annotation } => {
                write!(f, "{class}@{}", annotation.short_name())
            }
            Self::Supertype { class, supertype } => write!(f, "{class} : {supertype}"),
        }
    }
}

/// A single compile-time diagnostic for one declaration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    code: DiagnosticCode,
    message: String,
    location: SourceLocation,
}

impl Diagnostic {
    fn new(code: DiagnosticCode, message: String, location: SourceLocation) -> Self {
        Self {
            code,
            message,
            location,
        }
    }

    /// The stable error code.
    #[must_use]
    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// The human-readable message, surfaced to the user verbatim.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the diagnostic attaches in the declaration model.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// Runs the ordered legality checks against a planned decision.
///
/// Short-circuits with success when no marker applies to the class at all.
pub fn validate(class: &ClassDecl, decision: &RedactionDecision) -> Result<(), Diagnostic> {
    if !decision.is_redaction_present() {
        return Ok(());
    }

    let redacted = redacted_display_name(decision);
    let unredacted = unredacted_display_name(decision);
    let class_location = SourceLocation::Class {
        class: class.name().to_owned(),
    };

    // 1. Custom override conflict.
    if class.has_user_to_string() {
        return Err(Diagnostic::new(
            DiagnosticCode::CustomToStringConflict,
            format!(
                "@{redacted} is only supported on data or value classes that do *not* have a \
                 custom toString() function. Please remove the function or remove the \
                 @{redacted} annotations."
            ),
            class_location,
        ));
    }

    // 2. Disallowed kind.
    if class.kind() == ClassKind::Enum {
        return Err(Diagnostic::new(
            DiagnosticCode::EnumUnsupported,
            format!("@{redacted} does not support enum classes or entries!"),
            class_location,
        ));
    }

    // 3. Wrong shape.
    if class.is_final() && !(class.is_data() || class.is_value()) {
        return Err(Diagnostic::new(
            DiagnosticCode::NotDataOrValueClass,
            format!("@{redacted} is only supported on data or value classes!"),
            class_location,
        ));
    }

    // 4. Redundant value-class property annotation.
    if class.is_value() && decision.class_redacted().is_none() {
        let location = decision
            .properties()
            .iter()
            .find(|property| property.is_redacted())
            .map_or(class_location.clone(), |property| SourceLocation::Property {
                class: class.name().to_owned(),
                property: property.name().to_owned(),
            });
        return Err(Diagnostic::new(
            DiagnosticCode::RedundantOnValueClassProperty,
            format!(
                "@{redacted} is redundant on value class properties, just annotate the class \
                 instead."
            ),
            location,
        ));
    }

    // 5. Object-kind rules.
    if class.kind() == ClassKind::Object {
        if decision.supertype_redacted().is_none() {
            let location = decision.class_redacted().map_or(
                class_location.clone(),
                |annotation| SourceLocation::Annotation {
                    class: class.name().to_owned(),
                    annotation: annotation.clone(),
                },
            );
            return Err(Diagnostic::new(
                DiagnosticCode::UselessOnObject,
                format!("@{redacted} is useless on object classes."),
                location,
            ));
        }
        if let Some(annotation) = decision.class_unredacted() {
            return Err(Diagnostic::new(
                DiagnosticCode::UnredactedUselessOnObject,
                format!("@{unredacted} is useless on object classes."),
                SourceLocation::Annotation {
                    class: class.name().to_owned(),
                    annotation: annotation.clone(),
                },
            ));
        }
    }

    // 6. Double marker.
    if decision.class_redacted().is_some() && decision.class_unredacted().is_some() {
        return Err(Diagnostic::new(
            DiagnosticCode::RedactedAndUnredactedOnSameClass,
            format!("@{redacted} and @{unredacted} cannot be applied to a single class."),
            class_location,
        ));
    }

    // 7. Unredacted without context.
    if decision.class_unredacted().is_some() && decision.supertype_redacted().is_none() {
        return Err(Diagnostic::new(
            DiagnosticCode::UnredactedWithoutRedactedSupertype,
            format!(
                "@{unredacted} cannot be applied to a class unless a supertype is marked \
                 @{redacted}."
            ),
            class_location,
        ));
    }

    // 8. Stray unredacted property.
    if decision.any_property_unredacted()
        && decision.class_redacted().is_none()
        && decision.supertype_redacted().is_none()
    {
        let location = decision
            .properties()
            .iter()
            .find(|property| property.is_unredacted())
            .map_or(class_location.clone(), |property| SourceLocation::Property {
                class: class.name().to_owned(),
                property: property.name().to_owned(),
            });
        return Err(Diagnostic::new(
            DiagnosticCode::UnredactedPropertyWithoutContext,
            format!(
                "@{unredacted} should only be applied to properties in a class or a supertype \
                 is marked @{redacted}."
            ),
            location,
        ));
    }

    // 9. Source-of-truth exclusivity: exactly one of class, property set, and
    // supertype justifies the redaction.
    let sources = usize::from(decision.class_redacted().is_some())
        + usize::from(decision.any_property_redacted())
        + usize::from(decision.supertype_redacted().is_some());
    if sources != 1 {
        return Err(multiple_targets_diagnostic(class, decision, &redacted));
    }

    Ok(())
}

/// Builds the `MultipleRedactionTargets` diagnostic, enumerating every site
/// found so the user can see the whole conflict at once.
fn multiple_targets_diagnostic(
    class: &ClassDecl,
    decision: &RedactionDecision,
    redacted: &str,
) -> Diagnostic {
    let mut lines = vec![format!("@{redacted} detected on multiple targets:")];
    if decision.class_redacted().is_some() {
        lines.push(format!("class: '{}'", class.name()));
    }
    if decision.any_property_redacted() {
        let names: Vec<String> = decision
            .properties()
            .iter()
            .filter(|property| property.is_redacted())
            .map(|property| format!("'{}'", property.name()))
            .collect();
        lines.push(format!("properties: {}", names.join(", ")));
    }
    if let Some(supertype) = decision.supertype_redacted() {
        lines.push(format!("supertype: {}", supertype.class_name()));
    }

    let location = if let Some(annotation) = decision.class_redacted() {
        SourceLocation::Annotation {
            class: class.name().to_owned(),
            annotation: annotation.clone(),
        }
    } else if let Some(supertype) = decision.supertype_redacted() {
        SourceLocation::Supertype {
            class: class.name().to_owned(),
            supertype: supertype.class_name().to_owned(),
        }
    } else {
        SourceLocation::Class {
            class: class.name().to_owned(),
        }
    };

    Diagnostic::new(
        DiagnosticCode::MultipleRedactionTargets,
        lines.join("\n"),
        location,
    )
}

/// Short name of the redacted marker actually matched, for message rendering.
///
/// Falls back through property, class, and supertype sites so messages stay
/// sensible whichever site triggered the check.
fn redacted_display_name(decision: &RedactionDecision) -> String {
    decision
        .properties()
        .iter()
        .find_map(|property| property.redacted_by())
        .or_else(|| decision.class_redacted())
        .or_else(|| decision.supertype_redacted().map(|s| s.annotation()))
        .map_or_else(|| "Redacted".to_owned(), |a| a.short_name().to_owned())
}

fn unredacted_display_name(decision: &RedactionDecision) -> String {
    decision
        .properties()
        .iter()
        .find_map(|property| property.unredacted_by())
        .or_else(|| decision.class_unredacted())
        .map_or_else(|| "Unredacted".to_owned(), |a| a.short_name().to_owned())
}
