//! Schema definitions.
//!
//! A [`PropertySchema`] describes one property: its type name, constraints
//! and custom rules. A [`DocumentSchema`] groups the property schemas of one
//! document type.
//!
//! # Example
//!
//! ```rust
//! use propgate::{DocumentSchema, PropertySchema};
//! use serde_json::json;
//!
//! let schema = DocumentSchema::new()
//!     .property("name", PropertySchema::new("string").not_null(true).max_size(64))
//!     .property("age", PropertySchema::new("number").min_value(0))
//!     .property("role", PropertySchema::new("string").options(json!(["user", "admin"])));
//!
//! assert_eq!(schema.len(), 3);
//! ```

mod document;
mod property;

pub use document::DocumentSchema;
pub use property::PropertySchema;
