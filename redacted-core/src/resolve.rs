//! Annotation resolution: matching configured identity sets against the
//! direct annotations of a declaration.
//!
//! Resolution never looks through supertypes; supertype redaction is
//! discovered separately by the planner walking ancestors and calling the
//! same resolver on each one.

use std::collections::BTreeSet;

use crate::model::AnnotationIdentity;

/// Returns the subset of `identity_set` present among `annotations`.
///
/// Pure and total: unknown annotations are ignored, an empty result means no
/// match.
#[must_use]
pub fn resolve(
    annotations: &BTreeSet<AnnotationIdentity>,
    identity_set: &BTreeSet<AnnotationIdentity>,
) -> BTreeSet<AnnotationIdentity> {
    annotations.intersection(identity_set).cloned().collect()
}

/// Returns the first identity from `identity_set` present among
/// `annotations`, if any.
///
/// "First" follows the set's ordering, which makes the choice deterministic
/// when several aliases match at once.
#[must_use]
pub fn first_match<'a>(
    annotations: &BTreeSet<AnnotationIdentity>,
    identity_set: &'a BTreeSet<AnnotationIdentity>,
) -> Option<&'a AnnotationIdentity> {
    identity_set
        .iter()
        .find(|identity| annotations.contains(identity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<AnnotationIdentity> {
        names.iter().map(|name| AnnotationIdentity::new(*name)).collect()
    }

    #[test]
    fn resolve_returns_intersection() {
        let annotations = set(&["a.Redacted", "b.Other"]);
        let identities = set(&["a.Redacted", "c.Alias"]);
        assert_eq!(resolve(&annotations, &identities), set(&["a.Redacted"]));
    }

    #[test]
    fn resolve_is_empty_without_matches() {
        let annotations = set(&["b.Other"]);
        let identities = set(&["a.Redacted"]);
        assert!(resolve(&annotations, &identities).is_empty());
    }

    #[test]
    fn first_match_is_deterministic_across_aliases() {
        let annotations = set(&["a.Redacted", "c.Alias"]);
        let identities = set(&["c.Alias", "a.Redacted"]);
        // BTreeSet orders lexicographically, so "a.Redacted" wins.
        assert_eq!(
            first_match(&annotations, &identities),
            Some(&AnnotationIdentity::new("a.Redacted"))
        );
    }

    #[test]
    fn first_match_returns_none_without_matches() {
        let annotations = set(&[]);
        let identities = set(&["a.Redacted"]);
        assert_eq!(first_match(&annotations, &identities), None);
    }
}
