//! In-memory model loading for data package export.
//!
//! This crate provides a portable stand-in for a modeling tool's own storage:
//! a [`ModelDocument`] (JSON or YAML) describing data packages, classes,
//! properties, enumerations and primitive types, and [`Model`], an indexed,
//! read-only view over it that implements
//! [`ModelQuery`](capella_schema_core::ModelQuery).
//!
//! # Quick start
//!
//! ```no_run
//! use capella_schema_core::{Element, ModelQuery};
//! use capella_schema_model::Model;
//!
//! let model = Model::load("coffee-machine.yaml").unwrap();
//! for package in model.data_packages() {
//!     println!("{}", package.short_repr());
//! }
//! ```

mod document;
mod error;
mod loader;

pub use document::{
    ClassRecord, DataTypeRecord, EnumerationRecord, LiteralRecord, ModelDocument, PackageRecord,
    PropertyRecord,
};
pub use error::{ModelError, Result};
pub use loader::Model;
