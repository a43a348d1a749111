//! String codegen: the exact token sequence of the generated string method.
//!
//! The output reproduces, field for field, the separator and parenthesis
//! placement of a conventional generated data-class string method, with the
//! replacement literal spliced in wherever the redaction predicate holds. A
//! host lowers the sequence to whatever string-building primitive its target
//! offers.

use crate::model::{ClassDecl, TypeShape};
use crate::plan::{PropertyRedaction, RedactionDecision};

/// A reference to a property whose value is printed.
///
/// Carries the type shape and nullability so a lowering can route array
/// shapes through an elementwise, content-based conversion and render absent
/// nullable values as the literal `null`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueRef {
    name: String,
    shape: TypeShape,
    nullable: bool,
}

impl ValueRef {
    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property's type shape.
    #[must_use]
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// Whether the property's type admits an absent value.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// One instruction of the generated method body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringToken {
    /// Emit a fixed string.
    Literal(String),
    /// Emit the stringified value of a property.
    Value(ValueRef),
}

/// The ordered instructions of the generated method body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<StringToken>,
}

impl TokenSequence {
    fn push_literal<S: Into<String>>(&mut self, literal: S) {
        self.tokens.push(StringToken::Literal(literal.into()));
    }

    fn push_value(&mut self, value: ValueRef) {
        self.tokens.push(StringToken::Value(value));
    }

    /// The instructions in emission order.
    #[must_use]
    pub fn tokens(&self) -> &[StringToken] {
        &self.tokens
    }

    /// Lowers the sequence to a string, using `value_of` to stringify each
    /// property reference.
    ///
    /// The callback owns null/array rendering; the [`ValueRef`] tells it what
    /// the property's shape requires.
    #[must_use]
    pub fn render_with<F>(&self, mut value_of: F) -> String
    where
        F: FnMut(&ValueRef) -> String,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                StringToken::Literal(literal) => out.push_str(literal),
                StringToken::Value(value) => out.push_str(&value_of(value)),
            }
        }
        out
    }
}

/// Emits the token sequence for a validated decision.
///
/// Only constructor-backed properties are printed. Total: callers are
/// expected to have validated the decision, but any decision produces a
/// well-formed sequence.
#[must_use]
pub fn generate(
    class: &ClassDecl,
    decision: &RedactionDecision,
    replacement: &str,
) -> TokenSequence {
    let mut out = TokenSequence::default();
    out.push_literal(format!("{}(", class.name()));

    // Unredacted markers on constructor properties disable the fast path;
    // body properties are invisible to generated output.
    let has_unredacted_properties = class
        .properties()
        .iter()
        .zip(decision.properties())
        .any(|(property, flags)| property.is_constructor_backed() && flags.is_unredacted());

    if decision.class_redacted().is_some()
        && decision.class_unredacted().is_none()
        && !has_unredacted_properties
    {
        // Whole class redacted: one replacement literal, no property tokens.
        out.push_literal(replacement);
    } else {
        let mut first = true;
        for (property, flags) in class.properties().iter().zip(decision.properties()) {
            if !property.is_constructor_backed() {
                continue;
            }
            if !first {
                out.push_literal(", ");
            }
            out.push_literal(format!("{}=", property.name()));
            if redact_this(flags, decision) {
                out.push_literal(replacement);
            } else {
                out.push_value(ValueRef {
                    name: property.name().to_owned(),
                    shape: property.shape(),
                    nullable: property.is_nullable(),
                });
            }
            first = false;
        }
    }

    out.push_literal(")");
    out
}

/// Whether one property's value is replaced.
///
/// Class-level unredaction wins over supertype-level redaction; a property's
/// own unredacted marker wins over both inherited forms but never over a
/// direct redacted marker.
fn redact_this(property: &PropertyRedaction, decision: &RedactionDecision) -> bool {
    property.is_redacted()
        || (decision.class_redacted().is_some() && !property.is_unredacted())
        || (decision.supertype_redacted().is_some()
            && decision.class_unredacted().is_none()
            && !property.is_unredacted())
}
