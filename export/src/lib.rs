//! Data package export to a normalized JSON schema.
//!
//! This crate turns one data package of a model into the schema tree defined
//! in [`capella_schema_core`]. It works against the read-only
//! [`ModelQuery`] interface, so any model backend implementing the source
//! traits can be exported.
//!
//! # Main entry points
//!
//! - [`resolve::find_package`]: locate a data package by ID or name, failing
//!   on ambiguity.
//! - [`convert::convert_package`]: convert a package and everything it
//!   contains, reporting data-quality problems to a
//!   [`DiagnosticSink`](diagnostics::DiagnosticSink).
//! - [`export_package`]: both of the above in one call.
//! - [`output::render_json`] / [`output::write_output`]: the serialization
//!   boundary.
//!
//! # Example
//!
//! ```
//! use capella_schema_export::diagnostics::Diagnostic;
//! use capella_schema_export::export_package;
//! use capella_schema_export::output::{Indent, render_json};
//! use capella_schema_model::Model;
//!
//! let model = Model::from_yaml_str(r#"
//! name: Coffee Machine
//! uuid: m-0
//! packages:
//!   - uuid: pkg-1
//!     name: Data
//!     enumerations:
//!       - uuid: enum-1
//!         name: Size
//!         literals:
//!           - {uuid: lit-1, name: SMALL}
//!           - {uuid: lit-2, name: LARGE}
//! "#).unwrap();
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let package = export_package(&model, "Data", &mut diagnostics).unwrap();
//! assert_eq!(package.enums[0].literals[1].int_id, 1);
//!
//! let json = render_json(&package, Indent::Compact).unwrap();
//! assert!(json.starts_with("{\"name\":\"Data\",\"enums\":"));
//! ```

pub mod convert;
pub mod diagnostics;
mod error;
pub mod multiplicity;
pub mod output;
pub mod resolve;

use capella_schema_core::{ModelQuery, Package};

pub use error::{ExportError, Result};

use diagnostics::DiagnosticSink;
use resolve::ResolveError;

/// Resolves `reference` and converts the package it names.
///
/// Resolution errors abort before any conversion happens. Conversion itself
/// always completes; its diagnostics go to `sink`.
///
/// # Errors
///
/// Returns a [`ResolveError`] if `reference` does not identify exactly one
/// data package.
pub fn export_package<M>(
    model: &M,
    reference: &str,
    sink: &mut dyn DiagnosticSink,
) -> std::result::Result<Package, ResolveError>
where
    M: ModelQuery + ?Sized,
{
    let root = resolve::find_package(model, reference)?;
    Ok(convert::convert_package(root, sink))
}
