//! The redaction planner: combining class, property, and supertype marker
//! presence into a single [`RedactionDecision`].
//!
//! The planner is deterministic and side-effect-free. The validator and the
//! codegen both call it on the same inputs, so a class accepted by validation
//! always produces identical codegen input.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::RedactionConfig;
use crate::model::{AnnotationIdentity, ClassDecl};
use crate::resolve::first_match;

/// Marker presence for one property, in constructor order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRedaction {
    name: String,
    redacted_by: Option<AnnotationIdentity>,
    unredacted_by: Option<AnnotationIdentity>,
}

impl PropertyRedaction {
    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a redacted marker is directly applied.
    #[must_use]
    pub fn is_redacted(&self) -> bool {
        self.redacted_by.is_some()
    }

    /// Whether an unredacted marker is directly applied.
    #[must_use]
    pub fn is_unredacted(&self) -> bool {
        self.unredacted_by.is_some()
    }

    /// The matched redacted marker, if any.
    #[must_use]
    pub fn redacted_by(&self) -> Option<&AnnotationIdentity> {
        self.redacted_by.as_ref()
    }

    /// The matched unredacted marker, if any.
    #[must_use]
    pub fn unredacted_by(&self) -> Option<&AnnotationIdentity> {
        self.unredacted_by.as_ref()
    }
}

/// The nearest ancestor carrying a redacted marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupertypeRedaction {
    class_name: String,
    annotation: AnnotationIdentity,
}

impl SupertypeRedaction {
    /// Name of the redacted ancestor.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The marker found on the ancestor.
    #[must_use]
    pub fn annotation(&self) -> &AnnotationIdentity {
        &self.annotation
    }
}

/// The combined redaction decision for one class.
///
/// Recomputed fresh per declaration and per pass; never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedactionDecision {
    class_redacted: Option<AnnotationIdentity>,
    class_unredacted: Option<AnnotationIdentity>,
    supertype_redacted: Option<SupertypeRedaction>,
    properties: Vec<PropertyRedaction>,
}

impl RedactionDecision {
    /// The redacted marker on the class itself, if any.
    #[must_use]
    pub fn class_redacted(&self) -> Option<&AnnotationIdentity> {
        self.class_redacted.as_ref()
    }

    /// The unredacted marker on the class itself, if any.
    #[must_use]
    pub fn class_unredacted(&self) -> Option<&AnnotationIdentity> {
        self.class_unredacted.as_ref()
    }

    /// The nearest redacted ancestor, if any.
    #[must_use]
    pub fn supertype_redacted(&self) -> Option<&SupertypeRedaction> {
        self.supertype_redacted.as_ref()
    }

    /// Per-property marker presence, aligned with the class's property list.
    #[must_use]
    pub fn properties(&self) -> &[PropertyRedaction] {
        &self.properties
    }

    /// Whether any property carries a redacted marker.
    #[must_use]
    pub fn any_property_redacted(&self) -> bool {
        self.properties.iter().any(PropertyRedaction::is_redacted)
    }

    /// Whether any property carries an unredacted marker.
    #[must_use]
    pub fn any_property_unredacted(&self) -> bool {
        self.properties.iter().any(PropertyRedaction::is_unredacted)
    }

    /// Whether any marker applies to this class at all.
    ///
    /// This is both the validation gate and the generation gate: a class with
    /// no marker anywhere is a no-op and keeps its host-synthesized default.
    #[must_use]
    pub fn is_redaction_present(&self) -> bool {
        self.class_redacted.is_some()
            || self.supertype_redacted.is_some()
            || self.class_unredacted.is_some()
            || self.any_property_redacted()
    }
}

/// Computes the [`RedactionDecision`] for one class.
#[must_use]
pub fn plan(class: &ClassDecl, config: &RedactionConfig) -> RedactionDecision {
    let class_redacted =
        first_match(class.annotations(), config.redacted_annotations()).cloned();
    let class_unredacted =
        first_match(class.annotations(), config.unredacted_annotations()).cloned();
    let supertype_redacted = find_redacted_supertype(class, config);

    let properties = class
        .properties()
        .iter()
        .map(|property| PropertyRedaction {
            name: property.name().to_owned(),
            redacted_by: first_match(property.annotations(), config.redacted_annotations())
                .cloned(),
            unredacted_by: first_match(property.annotations(), config.unredacted_annotations())
                .cloned(),
        })
        .collect();

    RedactionDecision {
        class_redacted,
        class_unredacted,
        supertype_redacted,
        properties,
    }
}

/// Walks the ancestor closure in declaration order (direct supertypes first,
/// then theirs) and returns the first ancestor carrying a redacted marker.
///
/// Stops at the first hit: the nearest ancestor by traversal order, not all
/// hits.
fn find_redacted_supertype(
    class: &ClassDecl,
    config: &RedactionConfig,
) -> Option<SupertypeRedaction> {
    let mut queue: VecDeque<&Arc<ClassDecl>> = class.supertypes().iter().collect();
    while let Some(ancestor) = queue.pop_front() {
        if let Some(annotation) =
            first_match(ancestor.annotations(), config.redacted_annotations())
        {
            return Some(SupertypeRedaction {
                class_name: ancestor.name().to_owned(),
                annotation: annotation.clone(),
            });
        }
        queue.extend(ancestor.supertypes().iter());
    }
    None
}
