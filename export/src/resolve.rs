//! Locating the data package to export.
//!
//! A user-supplied reference is first tried as an element ID, then as a data
//! package name. Resolution either yields exactly one package or fails with a
//! [`ResolveError`]; it never picks among several candidates.

use std::fmt;

use capella_schema_core::{DataPackage, ElementKind, ModelQuery};
use thiserror::Error;
use tracing::debug;

/// A data package that matched an ambiguous name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// ID of the matching package.
    pub uuid: String,
    /// Short representation of its container, `None` if orphaned.
    pub parent: Option<String>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{} (in {parent})", self.uuid),
            None => write!(f, "{} (orphaned)", self.uuid),
        }
    }
}

/// Reasons a reference does not identify exactly one data package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No element has this ID and no data package has this name.
    #[error("couldn't find a DataPkg with ID or name {0:?}")]
    NotFound(String),

    /// The ID exists but belongs to something other than a data package.
    #[error("expected a DataPkg at ID {reference:?}, but found a {found} instead")]
    TypeMismatch {
        reference: String,
        found: ElementKind,
    },

    /// Several data packages share this name.
    #[error(
        "found more than one DataPkg with name {:?}:\n{}",
        .reference,
        render_candidates(.candidates)
    )]
    Ambiguous {
        reference: String,
        candidates: Vec<Candidate>,
    },
}

fn render_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the single data package identified by `reference`.
///
/// # Errors
///
/// - [`ResolveError::TypeMismatch`] if `reference` is the ID of an element
///   that is not a data package.
/// - [`ResolveError::NotFound`] if nothing matches by ID or name.
/// - [`ResolveError::Ambiguous`] if more than one data package has that name.
///
/// # Examples
///
/// ```
/// use capella_schema_core::Element;
/// use capella_schema_export::resolve::{find_package, ResolveError};
/// use capella_schema_model::Model;
///
/// let model = Model::from_yaml_str(r#"
/// name: M
/// uuid: m-0
/// packages:
///   - {uuid: pkg-1, name: Data}
/// "#).unwrap();
///
/// assert_eq!(find_package(&model, "pkg-1").unwrap().name(), "Data");
/// assert_eq!(find_package(&model, "Data").unwrap().uuid(), "pkg-1");
/// assert!(matches!(find_package(&model, "Nope"), Err(ResolveError::NotFound(_))));
/// ```
pub fn find_package<'m, M>(
    model: &'m M,
    reference: &str,
) -> Result<&'m dyn DataPackage, ResolveError>
where
    M: ModelQuery + ?Sized,
{
    if let Some(element) = model.by_uuid(reference) {
        debug!(reference, kind = %element.kind(), "reference matched an element ID");
        return element
            .as_data_package()
            .ok_or_else(|| ResolveError::TypeMismatch {
                reference: reference.to_string(),
                found: element.kind(),
            });
    }

    let mut matches = model.data_packages_named(reference);
    match matches.len() {
        0 => Err(ResolveError::NotFound(reference.to_string())),
        1 => Ok(matches.remove(0)),
        _ => {
            let candidates = matches
                .iter()
                .map(|package| Candidate {
                    uuid: package.uuid().to_string(),
                    parent: model.parent(package.uuid()).map(|p| p.short_repr()),
                })
                .collect();
            Err(ResolveError::Ambiguous {
                reference: reference.to_string(),
                candidates,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_display() {
        let inside = Candidate {
            uuid: "pkg-1".to_string(),
            parent: Some("<DataPkg \"Data\" (pkg-0)>".to_string()),
        };
        let orphan = Candidate {
            uuid: "pkg-2".to_string(),
            parent: None,
        };

        assert_eq!(inside.to_string(), "pkg-1 (in <DataPkg \"Data\" (pkg-0)>)");
        assert_eq!(orphan.to_string(), "pkg-2 (orphaned)");
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = ResolveError::Ambiguous {
            reference: "Types".to_string(),
            candidates: vec![
                Candidate {
                    uuid: "a".to_string(),
                    parent: Some("<Model \"M\" (m)>".to_string()),
                },
                Candidate {
                    uuid: "b".to_string(),
                    parent: None,
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "found more than one DataPkg with name \"Types\":\n  a (in <Model \"M\" (m)>)\n  b (orphaned)"
        );
    }

    #[test]
    fn test_type_mismatch_names_kind() {
        let err = ResolveError::TypeMismatch {
            reference: "cls-1".to_string(),
            found: ElementKind::Class,
        };

        assert_eq!(
            err.to_string(),
            "expected a DataPkg at ID \"cls-1\", but found a Class instead"
        );
    }
}
