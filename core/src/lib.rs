//! Core schema types and source model traits for data package export.
//!
//! This crate defines the two sides of the exporter's boundary:
//!
//! - The output tree: [`Package`] holding nested packages, [`Struct`]s with
//!   their [`StructAttr`]s, and [`Enum`]s with their [`EnumLiteral`]s. These
//!   are plain serde values, serialized with default-valued fields omitted.
//! - The read-only source interface in [`source`]: one trait per capability
//!   ([`DataPackage`], [`Class`], [`Property`], [`Enumeration`]) plus
//!   [`ModelQuery`] for whole-model lookups. Model backends implement these.
//!
//! # Example
//!
//! ```
//! use capella_schema_core::*;
//!
//! let package = Package::new("Data", "1f0e8c0a-0000-4000-8000-000000000001")
//!     .with_struct(
//!         Struct::new("Cup")
//!             .with_attr(StructAttr::new("volume", "1", "Float"))
//!             .with_attr(StructAttr::new("toppings", "*", "Topping")),
//!     )
//!     .with_enum(Enum::new("Size").with_literal(EnumLiteral::new(0, "SMALL")));
//!
//! let cup = package.find_struct("Cup").unwrap();
//! assert!(cup.find_attr("toppings").unwrap().is_unbounded());
//! assert!(!cup.has_parent());
//! ```

pub mod source;
mod types;

pub use source::{
    Class, DataPackage, Element, ElementKind, ElementRef, Enumeration, ModelQuery, Property,
};
pub use types::*;
