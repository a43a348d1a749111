//! The declaration model: a read-only view of a class handed over by the host.
//!
//! The core never resolves types or walks source itself; the host adapts its
//! own parser/type-checker output into these structures and the core only
//! reads them. Supertypes are shared read-only references and the inheritance
//! graph is acyclic by host-language rule.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// An opaque, comparable identifier for an annotation type.
///
/// Typically a fully qualified name such as `redacted.annotations.Redacted`.
/// The core never interprets the contents beyond equality and the short name
/// used in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnnotationIdentity(String);

impl AnnotationIdentity {
    /// Wraps an identity string.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Returns the full identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the trailing segment of a `.`- or `/`-separated identity.
    ///
    /// Diagnostics render annotations as `@ShortName`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(['.', '/'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for AnnotationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The value category of a property's type, as far as string output cares.
///
/// Array shapes must be rendered through an elementwise, content-based
/// conversion; everything else uses the host's default value-to-string
/// conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A plain value (numbers, strings, nested objects).
    Scalar,
    /// An array of reference-typed elements.
    ReferenceArray,
    /// An array of primitive elements.
    PrimitiveArray,
    /// An unsubstituted type parameter.
    Generic,
}

/// The declaration kind of a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// An ordinary (possibly data or value) class.
    Class,
    /// A singleton object declaration.
    Object,
    /// An enum class or enum entry.
    Enum,
    /// An interface.
    Interface,
}

/// A single property of a class, in primary-constructor order.
///
/// Only constructor-backed properties participate in generated string output,
/// matching how the host's default generated string method only prints
/// constructor properties. Body properties still carry annotations and are
/// visible to validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    name: String,
    shape: TypeShape,
    nullable: bool,
    annotations: BTreeSet<AnnotationIdentity>,
    constructor_backed: bool,
}

impl PropertyDecl {
    /// Creates a non-nullable, unannotated, constructor-backed property.
    #[must_use]
    pub fn new<S: Into<String>>(name: S, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            nullable: false,
            annotations: BTreeSet::new(),
            constructor_backed: true,
        }
    }

    /// Marks the property's type as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Adds a direct annotation.
    #[must_use]
    pub fn annotated<A: Into<AnnotationIdentity>>(mut self, annotation: A) -> Self {
        self.annotations.insert(annotation.into());
        self
    }

    /// Marks the property as declared in the class body rather than the
    /// primary constructor.
    #[must_use]
    pub fn body_declared(mut self) -> Self {
        self.constructor_backed = false;
        self
    }

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

    /// Direct annotations on the property.
    #[must_use]
    pub fn annotations(&self) -> &BTreeSet<AnnotationIdentity> {
        &self.annotations
    }

    /// Whether the property corresponds to a primary-constructor parameter.
    #[must_use]
    pub fn is_constructor_backed(&self) -> bool {
        self.constructor_backed
    }
}

/// An immutable, already-resolved view of a class declaration.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    name: String,
    kind: ClassKind,
    is_data: bool,
    is_value: bool,
    is_final: bool,
    has_user_to_string: bool,
    annotations: BTreeSet<AnnotationIdentity>,
    properties: Vec<PropertyDecl>,
    supertypes: Vec<Arc<ClassDecl>>,
}

impl ClassDecl {
    /// Creates a declaration of the given kind with no properties.
    ///
    /// Every kind except interfaces starts out final; use [`ClassDecl::open`]
    /// for open/abstract classes.
    #[must_use]
    pub fn new<S: Into<String>>(name: S, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_data: false,
            is_value: false,
            is_final: !matches!(kind, ClassKind::Interface),
            has_user_to_string: false,
            annotations: BTreeSet::new(),
            properties: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    /// Shorthand for a final data class.
    #[must_use]
    pub fn data_class<S: Into<String>>(name: S) -> Self {
        let mut class = Self::new(name, ClassKind::Class);
        class.is_data = true;
        class
    }

    /// Shorthand for a single-field value class.
    #[must_use]
    pub fn value_class<S: Into<String>>(name: S) -> Self {
        let mut class = Self::new(name, ClassKind::Class);
        class.is_value = true;
        class
    }

    /// Shorthand for a data object declaration.
    ///
    /// Plain (non-data) objects are final and fail the data-or-value shape
    /// check before any object-specific rule is reached.
    #[must_use]
    pub fn data_object<S: Into<String>>(name: S) -> Self {
        let mut class = Self::new(name, ClassKind::Object);
        class.is_data = true;
        class
    }

    /// Marks the class open (not final).
    #[must_use]
    pub fn open(mut self) -> Self {
        self.is_final = false;
        self
    }

    /// Adds a direct annotation.
    #[must_use]
    pub fn annotated<A: Into<AnnotationIdentity>>(mut self, annotation: A) -> Self {
        self.annotations.insert(annotation.into());
        self
    }

    /// Appends a property in constructor order.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends a direct supertype in declaration order.
    #[must_use]
    pub fn with_supertype(mut self, supertype: Arc<ClassDecl>) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// Records that the class declares its own string-conversion override.
    #[must_use]
    pub fn with_user_to_string(mut self) -> Self {
        self.has_user_to_string = true;
        self
    }

    /// The class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration kind.
    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Whether the class is a data class.
    #[must_use]
    pub fn is_data(&self) -> bool {
        self.is_data
    }

    /// Whether the class is a single-field value class.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.is_value
    }

    /// Whether the class is final.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether a user-authored string-conversion override exists.
    #[must_use]
    pub fn has_user_to_string(&self) -> bool {
        self.has_user_to_string
    }

    /// Direct annotations on the class.
    #[must_use]
    pub fn annotations(&self) -> &BTreeSet<AnnotationIdentity> {
        &self.annotations
    }

    /// All properties, in constructor order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    /// Direct supertypes, in declaration order.
    #[must_use]
    pub fn supertypes(&self) -> &[Arc<ClassDecl>] {
        &self.supertypes
    }
}
