//! Model loading and ID indexing.
//!
//! Provides [`Model`], an immutable in-memory model built from a
//! [`ModelDocument`]. Building the model indexes every element by its ID,
//! rejects duplicate IDs, and resolves property type references to type
//! names.
//!
//! # Loading patterns
//!
//! ```no_run
//! use capella_schema_model::Model;
//!
//! // Format is chosen by extension: .json, .yaml or .yml
//! let model = Model::load("coffee-machine.yaml").unwrap();
//! println!("{} has {} data packages", model.name(), model.package_count());
//! ```
//!
//! All ID lookups are O(depth) via the internal `HashMap` of element paths.

use std::collections::HashMap;
use std::path::Path;

use capella_schema_core::{DataPackage, ElementRef, ModelQuery};
use tracing::debug;

use crate::document::{ModelDocument, PackageRecord};
use crate::error::{ModelError, Result};

/// Which top-level package list an element lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Packages,
    Orphans,
}

/// One step down the containment tree, by child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Package(usize),
    Class(usize),
    Property(usize),
    Enumeration(usize),
    Literal(usize),
    DataType(usize),
}

/// Where an element sits in the document. An empty path is the model root.
#[derive(Debug, Clone)]
struct Location {
    root: Root,
    path: Vec<Step>,
}

/// Immutable in-memory model with indexed element lookup by ID.
///
/// Implements [`ModelQuery`], so it can be handed straight to the exporter.
///
/// # Examples
///
/// ```
/// use capella_schema_core::{ElementKind, ModelQuery};
/// use capella_schema_model::Model;
///
/// let model = Model::from_yaml_str(r#"
/// name: Coffee Machine
/// uuid: model-0
/// packages:
///   - uuid: pkg-1
///     name: Data
///     classes:
///       - {uuid: cls-1, name: Cup}
/// "#).unwrap();
///
/// assert_eq!(model.by_uuid("cls-1").unwrap().kind(), ElementKind::Class);
/// assert_eq!(model.parent("pkg-1").unwrap().kind(), ElementKind::Model);
/// assert_eq!(model.data_packages_named("Data").len(), 1);
/// ```
#[derive(Debug)]
pub struct Model {
    document: ModelDocument,
    index: HashMap<String, Location>,
}

impl Model {
    /// Loads a model document from a file.
    ///
    /// The format is chosen by extension: `.json` is parsed as JSON, `.yaml`
    /// and `.yml` as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedFormat`] for any other extension,
    /// [`ModelError::IoError`] if the file cannot be read, a parse error if
    /// the document is malformed, or [`ModelError::DuplicateUuid`] if two
    /// elements share an ID.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let file = match extension.as_deref() {
            Some("json") | Some("yaml") | Some("yml") => std::fs::File::open(path)?,
            _ => return Err(ModelError::UnsupportedFormat(path.display().to_string())),
        };
        let reader = std::io::BufReader::new(file);

        let document: ModelDocument = if extension.as_deref() == Some("json") {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };

        debug!(path = %path.display(), model = %document.name, "loaded model document");
        Self::from_document(document)
    }

    /// Parses a model document from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(raw)?)
    }

    /// Parses a model document from a YAML string.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Self::from_document(serde_yaml::from_str(raw)?)
    }

    /// Builds a model from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateUuid`] if two elements share an ID.
    pub fn from_document(mut document: ModelDocument) -> Result<Self> {
        let mut index = HashMap::new();
        index.insert(
            document.uuid.clone(),
            Location {
                root: Root::Packages,
                path: Vec::new(),
            },
        );
        index_packages(&document.packages, Root::Packages, &mut Vec::new(), &mut index)?;
        index_packages(&document.orphans, Root::Orphans, &mut Vec::new(), &mut index)?;

        let mut type_names = HashMap::new();
        for package in document.packages.iter().chain(&document.orphans) {
            collect_type_names(package, &mut type_names);
        }
        for package in document.packages.iter_mut().chain(&mut document.orphans) {
            resolve_types(package, &type_names);
        }

        debug!(elements = index.len(), "indexed model");
        Ok(Self { document, index })
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.document.name
    }

    /// Returns the underlying document.
    pub fn document(&self) -> &ModelDocument {
        &self.document
    }

    /// Returns the number of indexed elements, including the model root.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the model contains no elements besides its root.
    pub fn is_empty(&self) -> bool {
        self.index.len() <= 1
    }

    /// Returns the number of data packages in the model.
    pub fn package_count(&self) -> usize {
        self.data_packages().len()
    }

    fn roots(&self, root: Root) -> &[PackageRecord] {
        match root {
            Root::Packages => &self.document.packages,
            Root::Orphans => &self.document.orphans,
        }
    }

    fn resolve(&self, root: Root, path: &[Step]) -> Option<ElementRef<'_>> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(ElementRef::Other(&self.document));
        };
        let Step::Package(first) = first else {
            return None;
        };

        let mut package = self.roots(root).get(first)?;
        let mut steps = rest.iter();
        while let Some(step) = steps.next() {
            match *step {
                Step::Package(i) => package = package.packages.get(i)?,
                Step::Class(i) => {
                    let class = package.classes.get(i)?;
                    return match steps.next() {
                        Some(&Step::Property(j)) => {
                            class.properties.get(j).map(|p| ElementRef::Property(p))
                        }
                        Some(_) => None,
                        None => Some(ElementRef::Class(class)),
                    };
                }
                Step::Enumeration(i) => {
                    let enumeration = package.enumerations.get(i)?;
                    return match steps.next() {
                        Some(&Step::Literal(j)) => {
                            enumeration.literals.get(j).map(|l| ElementRef::Other(l))
                        }
                        Some(_) => None,
                        None => Some(ElementRef::Enumeration(enumeration)),
                    };
                }
                Step::DataType(i) => {
                    return package.data_types.get(i).map(|t| ElementRef::Other(t));
                }
                Step::Property(_) | Step::Literal(_) => return None,
            }
        }

        Some(ElementRef::DataPackage(package))
    }
}

impl ModelQuery for Model {
    fn by_uuid(&self, uuid: &str) -> Option<ElementRef<'_>> {
        let location = self.index.get(uuid)?;
        self.resolve(location.root, &location.path)
    }

    fn data_packages(&self) -> Vec<&dyn DataPackage> {
        let mut packages = Vec::new();
        collect_packages(&self.document.packages, &mut packages);
        collect_packages(&self.document.orphans, &mut packages);
        packages
    }

    fn parent(&self, uuid: &str) -> Option<ElementRef<'_>> {
        let location = self.index.get(uuid)?;
        let (_, parent_path) = location.path.split_last()?;
        if parent_path.is_empty() && location.root == Root::Orphans {
            return None;
        }
        self.resolve(location.root, parent_path)
    }
}

fn collect_packages<'m>(packages: &'m [PackageRecord], out: &mut Vec<&'m dyn DataPackage>) {
    for package in packages {
        out.push(package);
        collect_packages(&package.packages, out);
    }
}

fn index_packages(
    packages: &[PackageRecord],
    root: Root,
    path: &mut Vec<Step>,
    index: &mut HashMap<String, Location>,
) -> Result<()> {
    for (i, package) in packages.iter().enumerate() {
        path.push(Step::Package(i));
        insert(index, &package.uuid, root, path)?;

        for (c, class) in package.classes.iter().enumerate() {
            path.push(Step::Class(c));
            insert(index, &class.uuid, root, path)?;
            for (p, property) in class.properties.iter().enumerate() {
                path.push(Step::Property(p));
                insert(index, &property.uuid, root, path)?;
                path.pop();
            }
            path.pop();
        }

        for (e, enumeration) in package.enumerations.iter().enumerate() {
            path.push(Step::Enumeration(e));
            insert(index, &enumeration.uuid, root, path)?;
            for (l, literal) in enumeration.literals.iter().enumerate() {
                path.push(Step::Literal(l));
                insert(index, &literal.uuid, root, path)?;
                path.pop();
            }
            path.pop();
        }

        for (t, data_type) in package.data_types.iter().enumerate() {
            path.push(Step::DataType(t));
            insert(index, &data_type.uuid, root, path)?;
            path.pop();
        }

        index_packages(&package.packages, root, path, index)?;
        path.pop();
    }
    Ok(())
}

fn insert(
    index: &mut HashMap<String, Location>,
    uuid: &str,
    root: Root,
    path: &[Step],
) -> Result<()> {
    if index.contains_key(uuid) {
        return Err(ModelError::DuplicateUuid(uuid.to_string()));
    }
    index.insert(
        uuid.to_string(),
        Location {
            root,
            path: path.to_vec(),
        },
    );
    Ok(())
}

fn collect_type_names(package: &PackageRecord, names: &mut HashMap<String, String>) {
    for class in &package.classes {
        names.insert(class.uuid.clone(), class.name.clone());
    }
    for enumeration in &package.enumerations {
        names.insert(enumeration.uuid.clone(), enumeration.name.clone());
    }
    for data_type in &package.data_types {
        names.insert(data_type.uuid.clone(), data_type.name.clone());
    }
    for nested in &package.packages {
        collect_type_names(nested, names);
    }
}

fn resolve_types(package: &mut PackageRecord, names: &HashMap<String, String>) {
    for class in &mut package.classes {
        for property in &mut class.properties {
            property.resolved_type = match property.type_ref.as_deref() {
                Some(type_ref) => {
                    let name = names.get(type_ref).cloned();
                    if name.is_none() {
                        debug!(
                            property = %property.uuid,
                            type_ref,
                            "property type reference does not resolve"
                        );
                    }
                    name
                }
                None => None,
            };
        }
    }
    for nested in &mut package.packages {
        resolve_types(nested, names);
    }
}

#[cfg(test)]
mod tests {
    use capella_schema_core::{Element, ElementKind, Property};

    use super::*;

    const MODEL: &str = r#"
name: Coffee Machine
uuid: model-0
packages:
  - uuid: pkg-1
    name: Data
    packages:
      - uuid: pkg-2
        name: Drinks
        classes:
          - uuid: cls-1
            name: Cup
            properties:
              - {uuid: prop-1, name: volume, type: dt-1}
              - {uuid: prop-2, name: size, type: enum-1}
              - {uuid: prop-3, name: lid, type: missing}
    enumerations:
      - uuid: enum-1
        name: Size
        literals:
          - {uuid: lit-1, name: SMALL}
    data_types:
      - {uuid: dt-1, name: Float}
orphans:
  - uuid: pkg-9
    name: Drinks
"#;

    fn model() -> Model {
        Model::from_yaml_str(MODEL).unwrap()
    }

    #[test]
    fn test_by_uuid_finds_every_kind() {
        let model = model();

        assert_eq!(model.by_uuid("model-0").unwrap().kind(), ElementKind::Model);
        assert_eq!(model.by_uuid("pkg-2").unwrap().kind(), ElementKind::DataPkg);
        assert_eq!(model.by_uuid("prop-2").unwrap().kind(), ElementKind::Property);
        assert_eq!(
            model.by_uuid("lit-1").unwrap().kind(),
            ElementKind::EnumerationLiteral
        );
        assert_eq!(model.by_uuid("dt-1").unwrap().kind(), ElementKind::DataType);
        assert!(model.by_uuid("nope").is_none());
    }

    #[test]
    fn test_parent_walks_up_one_level() {
        let model = model();

        assert_eq!(model.parent("prop-1").unwrap().uuid(), "cls-1");
        assert_eq!(model.parent("cls-1").unwrap().uuid(), "pkg-2");
        assert_eq!(model.parent("pkg-1").unwrap().uuid(), "model-0");
        assert!(model.parent("pkg-9").is_none());
        assert!(model.parent("model-0").is_none());
    }

    #[test]
    fn test_data_packages_depth_first_with_orphans_last() {
        let model = model();
        let ids: Vec<&str> = model
            .data_packages()
            .into_iter()
            .map(|p| p.uuid())
            .collect();

        assert_eq!(ids, vec!["pkg-1", "pkg-2", "pkg-9"]);
        assert_eq!(model.data_packages_named("Drinks").len(), 2);
    }

    #[test]
    fn test_type_references_resolve_to_names() {
        let model = model();
        let type_of = |uuid: &str| match model.by_uuid(uuid) {
            Some(ElementRef::Property(p)) => p.type_name().map(String::from),
            _ => panic!("not a property: {uuid}"),
        };

        assert_eq!(type_of("prop-1").as_deref(), Some("Float"));
        assert_eq!(type_of("prop-2").as_deref(), Some("Size"));
        assert_eq!(type_of("prop-3"), None);
    }

    #[test]
    fn test_duplicate_uuid_is_rejected() {
        let raw = r#"
name: M
uuid: m
packages:
  - uuid: dup
    name: A
  - uuid: dup
    name: B
"#;
        let err = Model::from_yaml_str(raw).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateUuid(ref id) if id == "dup"));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = Model::load("model.capella").unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }
}
