//! The per-declaration driver: gate on configuration, plan, validate, and
//! generate.
//!
//! Hosts call [`check_class`] during their diagnostics phase and
//! [`generate_to_string`] during their lowering phase. Both recompute the
//! plan from the same inputs, so a declaration that validated cleanly always
//! generates from an identical decision.

use tracing::trace;

use crate::codegen::{generate, TokenSequence};
use crate::config::RedactionConfig;
use crate::model::ClassDecl;
use crate::plan::plan;
use crate::validate::{validate, Diagnostic};

/// Validates one class declaration against the configured markers.
///
/// Returns `Ok(())` without inspecting the class when the pass is disabled.
/// Unmarked classes are also accepted untouched; the validator only engages
/// once some marker applies.
pub fn check_class(class: &ClassDecl, config: &RedactionConfig) -> Result<(), Diagnostic> {
    if !config.is_enabled() {
        return Ok(());
    }
    let decision = plan(class, config);
    trace!(
        class = class.name(),
        class_redacted = decision.class_redacted().is_some(),
        class_unredacted = decision.class_unredacted().is_some(),
        supertype_redacted = decision.supertype_redacted().is_some(),
        "checking declaration"
    );
    validate(class, &decision)
}

/// Produces the replacement string-method body for one class, if any.
///
/// Returns `None` when the pass is disabled or no marker applies; the host
/// keeps its synthesized default in that case. Callers are expected to have
/// run [`check_class`] first.
#[must_use]
pub fn generate_to_string(class: &ClassDecl, config: &RedactionConfig) -> Option<TokenSequence> {
    if !config.is_enabled() {
        return None;
    }
    let decision = plan(class, config);
    if !decision.is_redaction_present() {
        return None;
    }
    trace!(class = class.name(), "generating string method body");
    Some(generate(class, &decision, config.replacement_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyDecl, TypeShape};
    use crate::validate::DiagnosticCode;

    const REDACTED: &str = "redacted.annotations.Redacted";

    #[test]
    fn disabled_pass_accepts_invalid_classes() {
        let class = ClassDecl::data_class("Holder")
            .annotated(REDACTED)
            .with_user_to_string();
        let config = RedactionConfig::new().disabled();
        assert!(check_class(&class, &config).is_ok());
        assert_eq!(generate_to_string(&class, &config), None);
    }

    #[test]
    fn unmarked_class_is_accepted_and_keeps_its_default() {
        let class = ClassDecl::data_class("Plain")
            .with_property(PropertyDecl::new("a", TypeShape::Scalar));
        let config = RedactionConfig::new();
        assert!(check_class(&class, &config).is_ok());
        assert_eq!(generate_to_string(&class, &config), None);
    }

    #[test]
    fn marked_class_is_validated() {
        let class = ClassDecl::data_class("Holder")
            .annotated(REDACTED)
            .with_user_to_string();
        let diagnostic = check_class(&class, &RedactionConfig::new()).unwrap_err();
        assert_eq!(diagnostic.code(), DiagnosticCode::CustomToStringConflict);
    }

    #[test]
    fn valid_marked_class_generates_a_body() {
        let class = ClassDecl::data_class("Secret")
            .annotated(REDACTED)
            .with_property(PropertyDecl::new("ssn", TypeShape::Scalar));
        let config = RedactionConfig::new();
        assert!(check_class(&class, &config).is_ok());
        let sequence = generate_to_string(&class, &config).unwrap();
        assert_eq!(
            sequence.render_with(|value| format!("<{}>", value.name())),
            "Secret(\u{2588}\u{2588})"
        );
    }
}
