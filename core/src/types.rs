//! Schema type definitions for exported data packages.
//!
//! This module defines the output tree produced by the exporter. The types
//! are plain values designed for serialization with [`serde`]: every export
//! builds a fresh tree, and nothing in it is shared or mutated afterwards.
//!
//! Fields holding their default value are omitted when serialized, so an
//! empty `info` or an empty child list never shows up in the JSON document.

use serde::{Deserialize, Serialize};

/// Multiplicity string for an unbounded property.
pub const UNBOUNDED: &str = "*";

/// Fallback type name for properties without a resolvable type.
pub const DEFAULT_DATA_TYPE: &str = "string";

/// An exported data package.
///
/// Holds the package's nested packages, structs and enumerations in source
/// order. The `prefix` carries the source node's stable identifier, which
/// downstream consumers use as a namespace prefix.
///
/// # Examples
///
/// ```
/// use capella_schema_core::{Enum, Package, Struct};
///
/// let package = Package::new("Data", "8f3c2a10-6a5e-4b5d-9d1e-0d6a5b1e9c11")
///     .with_info("Shared data definitions")
///     .with_struct(Struct::new("Cup"))
///     .with_enum(Enum::new("Size"));
///
/// assert_eq!(package.structs.len(), 1);
/// assert_eq!(package.enums[0].name, "Size");
/// assert!(package.sub_packages.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Free-form description copied from the source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Nested packages.
    #[serde(
        rename = "subPackages",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_packages: Vec<Package>,
    /// Record types declared in this package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structs: Vec<Struct>,
    /// Enumerations declared in this package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<Enum>,
    /// Stable identifier of the source package.
    pub prefix: String,
}

impl Package {
    /// Creates an empty package with the given name and prefix.
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Adds a nested package.
    pub fn with_package(mut self, package: Package) -> Self {
        self.sub_packages.push(package);
        self
    }

    /// Adds a struct.
    pub fn with_struct(mut self, item: Struct) -> Self {
        self.structs.push(item);
        self
    }

    /// Adds an enumeration.
    pub fn with_enum(mut self, item: Enum) -> Self {
        self.enums.push(item);
        self
    }

    /// Finds a direct sub-package by name.
    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.sub_packages.iter().find(|p| p.name == name)
    }

    /// Finds a struct declared directly in this package.
    pub fn find_struct(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Finds an enumeration declared directly in this package.
    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// An exported record type.
///
/// `extends` only records whether the source class has a supertype: it is
/// `None` for a root class and `Some("")` otherwise. The supertype itself is
/// not exported.
///
/// # Examples
///
/// ```
/// use capella_schema_core::{Struct, StructAttr};
///
/// let cup = Struct::new("Cup")
///     .with_attr(StructAttr::new("volume", "1", "Float"));
/// assert_eq!(cup.extends, None);
///
/// let mug = Struct::new("Mug").with_parent();
/// assert_eq!(mug.extends.as_deref(), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    /// Struct name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Supertype marker (see type docs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Attributes in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<StructAttr>,
}

impl Struct {
    /// Creates a struct without supertype or attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Marks the struct as having an (unnamed) supertype.
    pub fn with_parent(mut self) -> Self {
        self.extends = Some(String::new());
        self
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, attr: StructAttr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Returns `true` if the source class had a supertype.
    pub fn has_parent(&self) -> bool {
        self.extends.is_some()
    }

    /// Finds an attribute by name.
    pub fn find_attr(&self, name: &str) -> Option<&StructAttr> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

/// An attribute of a [`Struct`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructAttr {
    /// Attribute name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Canonical multiplicity (`"*"`, `"1"`, `"0..5"`, ...)
    pub multiplicity: String,
    /// Name of the attribute's type
    pub data_type: String,
}

impl StructAttr {
    /// Creates an attribute with the given multiplicity and type name.
    pub fn new(
        name: impl Into<String>,
        multiplicity: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            info: String::new(),
            multiplicity: multiplicity.into(),
            data_type: data_type.into(),
        }
    }

    /// Sets the description.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Returns `true` if the multiplicity has no upper bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use capella_schema_core::StructAttr;
    ///
    /// assert!(StructAttr::new("tags", "*", "string").is_unbounded());
    /// assert!(StructAttr::new("tags", "1..*", "string").is_unbounded());
    /// assert!(!StructAttr::new("tags", "0..5", "string").is_unbounded());
    /// ```
    pub fn is_unbounded(&self) -> bool {
        self.multiplicity == UNBOUNDED || self.multiplicity.ends_with("..*")
    }
}

/// An exported enumeration.
///
/// # Examples
///
/// ```
/// use capella_schema_core::{Enum, EnumLiteral};
///
/// let size = Enum::new("Size")
///     .with_literal(EnumLiteral::new(0, "SMALL"))
///     .with_literal(EnumLiteral::new(1, "LARGE"));
///
/// assert_eq!(size.literal_names(), vec!["SMALL", "LARGE"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Enumeration name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Literals in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub literals: Vec<EnumLiteral>,
}

impl Enum {
    /// Creates an enumeration without literals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Adds a literal.
    pub fn with_literal(mut self, literal: EnumLiteral) -> Self {
        self.literals.push(literal);
        self
    }

    /// Gets all literal names in order.
    pub fn literal_names(&self) -> Vec<&str> {
        self.literals.iter().map(|l| l.name.as_str()).collect()
    }
}

/// A literal of an [`Enum`].
///
/// `int_id` is the literal's position among its siblings, assigned during
/// export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumLiteral {
    /// Zero-based position within the enumeration
    #[serde(rename = "intId")]
    pub int_id: usize,
    /// Literal name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
}

impl EnumLiteral {
    /// Creates a literal at the given position.
    pub fn new(int_id: usize, name: impl Into<String>) -> Self {
        Self {
            int_id,
            name: name.into(),
            info: String::new(),
        }
    }

    /// Sets the description.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_package_omits_default_fields() {
        let package = Package::new("Data", "pkg-1");
        let value = serde_json::to_value(&package).unwrap();

        assert_eq!(value, json!({"name": "Data", "prefix": "pkg-1"}));
    }

    #[test]
    fn test_package_uses_wire_field_names() {
        let package = Package::new("Data", "pkg-1")
            .with_info("root")
            .with_package(Package::new("Nested", "pkg-2"))
            .with_enum(Enum::new("Size").with_literal(EnumLiteral::new(0, "SMALL")));
        let value = serde_json::to_value(&package).unwrap();

        assert_eq!(value["info"], "root");
        assert_eq!(value["subPackages"][0]["name"], "Nested");
        assert_eq!(value["enums"][0]["literals"][0]["intId"], 0);
        assert!(value.get("structs").is_none());
    }

    #[test]
    fn test_struct_extends_placeholder_is_serialized() {
        let root = serde_json::to_value(Struct::new("Cup")).unwrap();
        assert!(root.get("extends").is_none());

        let child = serde_json::to_value(Struct::new("Mug").with_parent()).unwrap();
        assert_eq!(child["extends"], "");
    }

    #[test]
    fn test_struct_attr_always_has_multiplicity_and_type() {
        let attr = StructAttr::new("volume", "1", "Float");
        let value = serde_json::to_value(&attr).unwrap();

        assert_eq!(
            value,
            json!({"name": "volume", "multiplicity": "1", "data_type": "Float"})
        );
    }

    #[test]
    fn test_enum_literal_zero_id_is_kept() {
        let literal = EnumLiteral::new(0, "SMALL").with_info("8 oz");
        let value = serde_json::to_value(&literal).unwrap();

        assert_eq!(value, json!({"intId": 0, "name": "SMALL", "info": "8 oz"}));
    }

    #[test]
    fn test_package_reads_back_exported_document() {
        let raw = r#"{"name":"Data","structs":[{"name":"Cup","extends":""}],"prefix":"p"}"#;
        let package: Package = serde_json::from_str(raw).unwrap();

        assert_eq!(package.prefix, "p");
        assert!(package.find_struct("Cup").unwrap().has_parent());
        assert!(package.find_enum("Size").is_none());
    }
}
