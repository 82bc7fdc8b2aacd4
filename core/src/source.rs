//! Read-only query interface over a source model.
//!
//! The exporter never depends on a concrete model representation. Instead it
//! is written against one trait per capability: [`Element`] for anything with
//! an identity, [`DataPackage`], [`Class`], [`Property`] and [`Enumeration`]
//! for the containers it walks, and [`ModelQuery`] for whole-model lookups.
//! A model backend provides adapters implementing these traits.

use std::fmt;

/// Kind of a model element.
///
/// The `Display` impl prints the metamodel class name, which is what error
/// messages and short representations show.
///
/// # Examples
///
/// ```
/// use capella_schema_core::ElementKind;
///
/// assert_eq!(ElementKind::DataPkg.to_string(), "DataPkg");
/// assert_eq!(ElementKind::EnumerationLiteral.to_string(), "EnumerationLiteral");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The model root.
    Model,
    /// A data package.
    DataPkg,
    /// A class (exported as a struct).
    Class,
    /// A property of a class.
    Property,
    /// An enumeration.
    Enumeration,
    /// A literal of an enumeration.
    EnumerationLiteral,
    /// A primitive data type (boolean, string, numeric, ...).
    DataType,
}

impl ElementKind {
    /// Returns the metamodel class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::DataPkg => "DataPkg",
            Self::Class => "Class",
            Self::Property => "Property",
            Self::Enumeration => "Enumeration",
            Self::EnumerationLiteral => "EnumerationLiteral",
            Self::DataType => "DataType",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything in the model with an identity.
pub trait Element {
    /// Stable unique identifier.
    fn uuid(&self) -> &str;
    /// Element name (may be empty).
    fn name(&self) -> &str;
    /// Description text (may be empty).
    fn description(&self) -> &str;
    /// Metamodel kind.
    fn kind(&self) -> ElementKind;

    /// Short human-readable representation: `<Kind "name" (uuid)>`.
    fn short_repr(&self) -> String {
        format!("<{} {:?} ({})>", self.kind(), self.name(), self.uuid())
    }
}

/// A container of nested packages, classes and enumerations.
pub trait DataPackage: Element {
    /// Directly nested packages, in source order.
    fn packages(&self) -> Vec<&dyn DataPackage>;
    /// Classes declared in this package, in source order.
    fn classes(&self) -> Vec<&dyn Class>;
    /// Enumerations declared in this package, in source order.
    fn enumerations(&self) -> Vec<&dyn Enumeration>;
}

/// A record type.
pub trait Class: Element {
    /// Whether the class has a supertype.
    fn has_super(&self) -> bool;
    /// Owned properties, in source order.
    fn properties(&self) -> Vec<&dyn Property>;
}

/// A typed, multiplicity-annotated member of a [`Class`].
pub trait Property: Element {
    /// Raw value of the minimum cardinality, if one is set.
    fn min_card(&self) -> Option<&str>;
    /// Raw value of the maximum cardinality, if one is set.
    fn max_card(&self) -> Option<&str>;
    /// Name of the referenced type, if the reference resolves.
    fn type_name(&self) -> Option<&str>;
}

/// An enumeration type.
pub trait Enumeration: Element {
    /// Literals, in source order.
    fn literals(&self) -> Vec<&dyn Element>;
}

/// A borrowed model element tagged with its capability set.
#[derive(Clone, Copy)]
pub enum ElementRef<'a> {
    DataPackage(&'a dyn DataPackage),
    Class(&'a dyn Class),
    Property(&'a dyn Property),
    Enumeration(&'a dyn Enumeration),
    /// The model root, literals, data types and anything else without
    /// children the exporter walks.
    Other(&'a dyn Element),
}

impl<'a> ElementRef<'a> {
    /// Returns the element's kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::DataPackage(e) => e.kind(),
            Self::Class(e) => e.kind(),
            Self::Property(e) => e.kind(),
            Self::Enumeration(e) => e.kind(),
            Self::Other(e) => e.kind(),
        }
    }

    /// Returns the element's identifier.
    pub fn uuid(&self) -> &'a str {
        match *self {
            Self::DataPackage(e) => e.uuid(),
            Self::Class(e) => e.uuid(),
            Self::Property(e) => e.uuid(),
            Self::Enumeration(e) => e.uuid(),
            Self::Other(e) => e.uuid(),
        }
    }

    /// Returns the element's name.
    pub fn name(&self) -> &'a str {
        match *self {
            Self::DataPackage(e) => e.name(),
            Self::Class(e) => e.name(),
            Self::Property(e) => e.name(),
            Self::Enumeration(e) => e.name(),
            Self::Other(e) => e.name(),
        }
    }

    /// Returns the element's short representation.
    pub fn short_repr(&self) -> String {
        match self {
            Self::DataPackage(e) => e.short_repr(),
            Self::Class(e) => e.short_repr(),
            Self::Property(e) => e.short_repr(),
            Self::Enumeration(e) => e.short_repr(),
            Self::Other(e) => e.short_repr(),
        }
    }

    /// Returns the data package, if this is one.
    pub fn as_data_package(&self) -> Option<&'a dyn DataPackage> {
        match *self {
            Self::DataPackage(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_repr())
    }
}

/// Whole-model queries.
pub trait ModelQuery {
    /// Looks up an element by its unique identifier.
    fn by_uuid(&self, uuid: &str) -> Option<ElementRef<'_>>;

    /// Returns every data package in the model.
    fn data_packages(&self) -> Vec<&dyn DataPackage>;

    /// Returns every data package with the given name.
    fn data_packages_named(&self, name: &str) -> Vec<&dyn DataPackage> {
        self.data_packages()
            .into_iter()
            .filter(|p| p.name() == name)
            .collect()
    }

    /// Returns the container of the element with the given identifier, or
    /// `None` if the element is orphaned.
    fn parent(&self, uuid: &str) -> Option<ElementRef<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Literal;

    impl Element for Literal {
        fn uuid(&self) -> &str {
            "lit-1"
        }
        fn name(&self) -> &str {
            "SMALL"
        }
        fn description(&self) -> &str {
            ""
        }
        fn kind(&self) -> ElementKind {
            ElementKind::EnumerationLiteral
        }
    }

    #[test]
    fn test_short_repr_quotes_name() {
        assert_eq!(Literal.short_repr(), r#"<EnumerationLiteral "SMALL" (lit-1)>"#);
    }

    #[test]
    fn test_element_ref_delegates() {
        let literal = Literal;
        let element = ElementRef::Other(&literal);

        assert_eq!(element.kind(), ElementKind::EnumerationLiteral);
        assert_eq!(element.uuid(), "lit-1");
        assert!(element.as_data_package().is_none());
    }
}
