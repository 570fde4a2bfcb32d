//! # Propgate
//!
//! An asynchronous, per-property validation pipeline for schema-driven
//! documents.
//!
//! ## Overview
//!
//! Each property of a document is validated by its own pipeline run. The run
//! resolves defaults, enforces the not-null constraint, hands the value to the
//! type handler registered for the schema's type, checks the allowed options,
//! applies custom business rules, and runs the before/after converters. It
//! ends with the final value, the [`Validated::NotAValue`] sentinel for an
//! absent optional property, or a [`PropertyError`].
//!
//! A schema naming a type nobody registered is not bad data: it is reported
//! as a [`ValidationFault`] in the outer `Result`, never as a property error.
//!
//! ## Core Types
//!
//! - [`PropertyContext`]: the per-property unit of work, consumed by `validate()`
//! - [`PropertySchema`] / [`DocumentSchema`]: types, constraints and custom rules
//! - [`Resolvable`]: literal or computed schema values
//! - [`TypeHandler`], [`CustomValidator`], [`Converter`], [`Session`]: collaborator seams
//! - [`DocumentValidator`]: validates every property of a document, accumulating errors
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use propgate::{
//!     Document, DocumentSchema, HandlerRegistry, PropertyContext, PropertyPath,
//!     PropertySchema, ValidationSession,
//! };
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let schema = Arc::new(
//!     PropertySchema::new("string")
//!         .options(json!(["ok", "ko"]))
//!         .after_with(|ctx| Ok(json!(ctx.value().as_str().unwrap_or("").to_uppercase()))),
//! );
//! let session = Arc::new(ValidationSession::new(HandlerRegistry::with_builtin_handlers()));
//!
//! let ctx = PropertyContext::new(
//!     Document::new(json!({"status": "ok"})),
//!     json!("ok"),
//!     PropertyPath::new("status"),
//!     schema,
//!     Arc::new(DocumentSchema::new()),
//!     false,
//!     session,
//! );
//!
//! let result = ctx.validate().await.unwrap();
//! assert!(result.is_success());
//! # });
//! ```

pub mod context;
pub mod custom;
pub mod document;
pub mod error;
pub mod handlers;
pub mod path;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod session;

pub use context::{is_empty, Document, PropertyContext, Validated};
pub use custom::{
    Converter, ConverterChain, CustomValidator, FnConverter, FnValidator, ValidatorChain,
};
pub use document::DocumentValidator;
pub use error::{ErrorFactory, ErrorKind, PropertyError, PropertyErrors, ValidationFault};
pub use handlers::{ArrayHandler, BooleanHandler, NumberHandler, StringHandler, TypeHandler};
pub use path::{ParsePathError, PathSegment, PropertyPath};
pub use pipeline::PropertyValidation;
pub use registry::{HandlerRegistry, RegistryError};
pub use resolver::{resolve, Resolvable};
pub use schema::{DocumentSchema, PropertySchema};
pub use session::{Session, ValidationSession};

/// Type alias for document validation results using PropertyErrors
pub type ValidationResult<T> = stillwater::Validation<T, PropertyErrors>;
