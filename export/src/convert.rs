//! Conversion from source model elements to the output schema.
//!
//! [`convert_package`] walks a data package depth-first and builds a fresh
//! [`Package`] tree. Children keep their source order. Data-quality problems
//! never abort the walk; they are reported to the [`DiagnosticSink`] and
//! replaced by defaults.

use std::collections::HashSet;

use capella_schema_core::{
    Class, DEFAULT_DATA_TYPE, DataPackage, Element, Enum, EnumLiteral, Enumeration, Package,
    Property, Struct, StructAttr,
};
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::multiplicity::normalize;

/// Converts a data package and everything it contains.
///
/// # Examples
///
/// ```
/// use capella_schema_export::convert::convert_package;
/// use capella_schema_export::diagnostics::Diagnostic;
/// use capella_schema_export::resolve::find_package;
/// use capella_schema_model::Model;
///
/// let model = Model::from_yaml_str(r#"
/// name: M
/// uuid: m-0
/// packages:
///   - uuid: pkg-1
///     name: Data
///     classes:
///       - uuid: cls-1
///         name: Cup
///         properties:
///           - {uuid: prop-1, name: lid}
/// "#).unwrap();
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let root = find_package(&model, "Data").unwrap();
/// let package = convert_package(root, &mut diagnostics);
///
/// let lid = &package.structs[0].attrs[0];
/// assert_eq!(lid.multiplicity, "*");
/// assert_eq!(lid.data_type, "string");
/// assert_eq!(diagnostics.len(), 1);
/// ```
pub fn convert_package(package: &dyn DataPackage, sink: &mut dyn DiagnosticSink) -> Package {
    let mut converter = Converter {
        sink,
        ancestors: HashSet::new(),
    };
    converter.package(package)
}

/// Converts a single class.
pub fn convert_class(class: &dyn Class, sink: &mut dyn DiagnosticSink) -> Struct {
    let mut converter = Converter {
        sink,
        ancestors: HashSet::new(),
    };
    converter.class(class)
}

/// Converts a single enumeration.
pub fn convert_enumeration(enumeration: &dyn Enumeration) -> Enum {
    Enum {
        name: enumeration.name().to_string(),
        info: enumeration.description().to_string(),
        literals: enumeration
            .literals()
            .into_iter()
            .enumerate()
            .map(|(int_id, literal)| EnumLiteral {
                int_id,
                name: literal.name().to_string(),
                info: literal.description().to_string(),
            })
            .collect(),
    }
}

struct Converter<'s> {
    sink: &'s mut dyn DiagnosticSink,
    /// IDs of the packages on the current descent path.
    ancestors: HashSet<String>,
}

impl Converter<'_> {
    fn package(&mut self, package: &dyn DataPackage) -> Package {
        self.ancestors.insert(package.uuid().to_string());

        let mut sub_packages = Vec::new();
        for nested in package.packages() {
            if self.ancestors.contains(nested.uuid()) {
                self.sink.report(Diagnostic::CyclicContainment {
                    owner: nested.short_repr(),
                });
                continue;
            }
            sub_packages.push(self.package(nested));
        }

        let structs: Vec<Struct> = package
            .classes()
            .into_iter()
            .map(|class| self.class(class))
            .collect();
        let enums: Vec<Enum> = package
            .enumerations()
            .into_iter()
            .map(convert_enumeration)
            .collect();

        self.ancestors.remove(package.uuid());
        debug!(package = %package.short_repr(), "converted package");

        Package {
            name: package.name().to_string(),
            info: package.description().to_string(),
            sub_packages,
            structs,
            enums,
            prefix: package.uuid().to_string(),
        }
    }

    fn class(&mut self, class: &dyn Class) -> Struct {
        Struct {
            name: class.name().to_string(),
            info: class.description().to_string(),
            extends: class.has_super().then(String::new),
            attrs: class
                .properties()
                .into_iter()
                .map(|property| self.property(property))
                .collect(),
        }
    }

    fn property(&mut self, property: &dyn Property) -> StructAttr {
        let owner = property.short_repr();
        let multiplicity = normalize(
            property.min_card(),
            property.max_card(),
            &owner,
            &mut *self.sink,
        );

        let data_type = match property.type_name() {
            Some(name) => name.to_string(),
            None => {
                self.sink.report(Diagnostic::UnresolvedType { owner });
                DEFAULT_DATA_TYPE.to_string()
            }
        };

        StructAttr {
            name: property.name().to_string(),
            info: property.description().to_string(),
            multiplicity,
            data_type,
        }
    }
}
