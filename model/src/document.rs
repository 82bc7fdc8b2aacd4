//! Serializable model document.
//!
//! A model document is a tree of data packages, each holding nested packages,
//! classes, enumerations and primitive data types. Cross references (a class's
//! supertype, a property's type) are expressed as element IDs.
//!
//! # Example YAML
//!
//! ```yaml
//! name: Coffee Machine
//! uuid: 3b0a3d4e-0000-4000-8000-000000000000
//! packages:
//!   - uuid: 3b0a3d4e-0000-4000-8000-000000000001
//!     name: Data
//!     classes:
//!       - uuid: 3b0a3d4e-0000-4000-8000-000000000002
//!         name: Cup
//!         properties:
//!           - uuid: 3b0a3d4e-0000-4000-8000-000000000003
//!             name: volume
//!             min_card: "1"
//!             max_card: "1"
//!             type: 3b0a3d4e-0000-4000-8000-000000000004
//!     data_types:
//!       - uuid: 3b0a3d4e-0000-4000-8000-000000000004
//!         name: Float
//! ```
//!
//! The record types implement the traits from
//! [`capella_schema_core::source`] directly, so the exporter can walk a
//! loaded document without copying it.

use capella_schema_core::{Class, DataPackage, Element, ElementKind, Enumeration, Property};
use serde::{Deserialize, Serialize};

/// Top-level model document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Model name.
    pub name: String,
    /// Model root identifier.
    pub uuid: String,
    /// Model description.
    #[serde(default)]
    pub description: String,
    /// Root data packages. Their parent is the model itself.
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    /// Data packages not attached to any container.
    #[serde(default)]
    pub orphans: Vec<PackageRecord>,
}

/// A data package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub enumerations: Vec<EnumerationRecord>,
    /// Primitive types. Valid property type targets, never exported.
    #[serde(default)]
    pub data_types: Vec<DataTypeRecord>,
}

/// A class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// ID of the supertype, if any.
    #[serde(default, rename = "super", skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

/// A class property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw minimum cardinality value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_card: Option<String>,
    /// Raw maximum cardinality value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_card: Option<String>,
    /// ID of the property's type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<String>,
    /// Name of the type `type_ref` points at, filled in when the model is
    /// indexed.
    #[serde(skip)]
    pub(crate) resolved_type: Option<String>,
}

/// An enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub literals: Vec<LiteralRecord>,
}

/// An enumeration literal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A primitive data type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTypeRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

macro_rules! impl_element {
    ($record:ty, $kind:expr) => {
        impl Element for $record {
            fn uuid(&self) -> &str {
                &self.uuid
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn kind(&self) -> ElementKind {
                $kind
            }
        }
    };
}

impl_element!(ModelDocument, ElementKind::Model);
impl_element!(PackageRecord, ElementKind::DataPkg);
impl_element!(ClassRecord, ElementKind::Class);
impl_element!(PropertyRecord, ElementKind::Property);
impl_element!(EnumerationRecord, ElementKind::Enumeration);
impl_element!(LiteralRecord, ElementKind::EnumerationLiteral);
impl_element!(DataTypeRecord, ElementKind::DataType);

impl DataPackage for PackageRecord {
    fn packages(&self) -> Vec<&dyn DataPackage> {
        self.packages.iter().map(|p| p as &dyn DataPackage).collect()
    }

    fn classes(&self) -> Vec<&dyn Class> {
        self.classes.iter().map(|c| c as &dyn Class).collect()
    }

    fn enumerations(&self) -> Vec<&dyn Enumeration> {
        self.enumerations
            .iter()
            .map(|e| e as &dyn Enumeration)
            .collect()
    }
}

impl Class for ClassRecord {
    fn has_super(&self) -> bool {
        self.super_class.is_some()
    }

    fn properties(&self) -> Vec<&dyn Property> {
        self.properties.iter().map(|p| p as &dyn Property).collect()
    }
}

impl Property for PropertyRecord {
    fn min_card(&self) -> Option<&str> {
        self.min_card.as_deref()
    }

    fn max_card(&self) -> Option<&str> {
        self.max_card.as_deref()
    }

    fn type_name(&self) -> Option<&str> {
        self.resolved_type.as_deref()
    }
}

impl Enumeration for EnumerationRecord {
    fn literals(&self) -> Vec<&dyn Element> {
        self.literals.iter().map(|l| l as &dyn Element).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_reads_optional_fields() {
        let yaml = r#"
uuid: prop-1
name: volume
min_card: "0"
type: float-1
"#;
        let property: PropertyRecord = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(property.min_card(), Some("0"));
        assert_eq!(property.max_card(), None);
        assert_eq!(property.type_ref.as_deref(), Some("float-1"));
        // Unresolved until indexed by a Model.
        assert_eq!(property.type_name(), None);
    }

    #[test]
    fn test_class_super_marks_parent() {
        let class: ClassRecord =
            serde_json::from_str(r#"{"uuid":"c-1","name":"Mug","super":"c-0"}"#).unwrap();

        assert!(class.has_super());
        assert!(class.properties().is_empty());
        assert_eq!(class.kind(), ElementKind::Class);
    }

    #[test]
    fn test_package_children_keep_document_order() {
        let yaml = r#"
uuid: pkg-1
name: Data
packages:
  - {uuid: pkg-2, name: B}
  - {uuid: pkg-3, name: A}
enumerations:
  - uuid: enum-1
    name: Size
    literals:
      - {uuid: lit-1, name: SMALL}
      - {uuid: lit-2, name: LARGE}
"#;
        let package: PackageRecord = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = package.packages().into_iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "A"]);

        let enumerations = package.enumerations();
        let literals = enumerations[0].literals();
        assert_eq!(literals[1].name(), "LARGE");
    }
}
