//! Pass-wide configuration consumed from the host.
//!
//! The configuration is fixed for a whole pass and shared read-only across
//! declarations, so it needs no interior mutability or locking.

use std::collections::BTreeSet;

use crate::model::AnnotationIdentity;

/// Default literal substituted for redacted content.
pub const DEFAULT_REPLACEMENT_STRING: &str = "\u{2588}\u{2588}";

/// Default identity counted as a "redacted" marker.
pub const DEFAULT_REDACTED_ANNOTATION: &str = "redacted.annotations.Redacted";

/// Default identity counted as an "unredacted" override marker.
pub const DEFAULT_UNREDACTED_ANNOTATION: &str = "redacted.annotations.Unredacted";

/// Configuration for the redaction pass.
///
/// Both marker slots are *sets* of identities so multiple annotation aliases
/// can be honored simultaneously.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactionConfig {
    enabled: bool,
    replacement_string: String,
    redacted_annotations: BTreeSet<AnnotationIdentity>,
    unredacted_annotations: BTreeSet<AnnotationIdentity>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            replacement_string: DEFAULT_REPLACEMENT_STRING.to_owned(),
            redacted_annotations: BTreeSet::from([AnnotationIdentity::new(
                DEFAULT_REDACTED_ANNOTATION,
            )]),
            unredacted_annotations: BTreeSet::from([AnnotationIdentity::new(
                DEFAULT_UNREDACTED_ANNOTATION,
            )]),
        }
    }
}

impl RedactionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables the whole pass.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Uses a specific replacement literal.
    #[must_use]
    pub fn with_replacement_string<S: Into<String>>(mut self, replacement: S) -> Self {
        self.replacement_string = replacement.into();
        self
    }

    /// Registers an additional "redacted" marker alias.
    #[must_use]
    pub fn with_redacted_annotation<A: Into<AnnotationIdentity>>(mut self, annotation: A) -> Self {
        self.redacted_annotations.insert(annotation.into());
        self
    }

    /// Registers an additional "unredacted" marker alias.
    #[must_use]
    pub fn with_unredacted_annotation<A: Into<AnnotationIdentity>>(
        mut self,
        annotation: A,
    ) -> Self {
        self.unredacted_annotations.insert(annotation.into());
        self
    }

    /// Whether the pass runs at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The literal substituted for redacted content.
    #[must_use]
    pub fn replacement_string(&self) -> &str {
        &self.replacement_string
    }

    /// Identities counted as "redacted" markers.
    #[must_use]
    pub fn redacted_annotations(&self) -> &BTreeSet<AnnotationIdentity> {
        &self.redacted_annotations
    }

    /// Identities counted as "unredacted" override markers.
    #[must_use]
    pub fn unredacted_annotations(&self) -> &BTreeSet<AnnotationIdentity> {
        &self.unredacted_annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RedactionConfig::new();
        assert!(config.is_enabled());
        assert_eq!(config.replacement_string(), "\u{2588}\u{2588}");
        assert!(config
            .redacted_annotations()
            .contains(&AnnotationIdentity::new(DEFAULT_REDACTED_ANNOTATION)));
        assert!(config
            .unredacted_annotations()
            .contains(&AnnotationIdentity::new(DEFAULT_UNREDACTED_ANNOTATION)));
    }

    #[test]
    fn aliases_accumulate() {
        let config = RedactionConfig::new()
            .with_redacted_annotation("com.example.Redact")
            .with_redacted_annotation("com.example.Sensitive");
        assert_eq!(config.redacted_annotations().len(), 3);
    }

    #[test]
    fn disabled_flag_round_trips() {
        let config = RedactionConfig::new().disabled();
        assert!(!config.is_enabled());
    }
}
