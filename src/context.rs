//! The unit of work of a pipeline run.
//!
//! A [`PropertyContext`] is built by the caller for one property, handed to
//! [`PropertyContext::validate`], and consumed by it. Handlers, validators,
//! converters and computed expressions all observe the run through it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::ErrorFactory;
use crate::path::PropertyPath;
use crate::resolver::{self, Resolvable};
use crate::schema::{DocumentSchema, PropertySchema};
use crate::session::Session;

/// Shared handle to the document being validated.
///
/// Clones refer to the same document. Collaborators may read and write it;
/// the pipeline itself never does. Guards are short-lived and must not be
/// held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct Document(Arc<RwLock<Value>>);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Returns a copy of a top-level field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.0.read().get(field).cloned()
    }

    /// Sets a top-level field. Does nothing if the document is not an object.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        if let Some(obj) = self.0.write().as_object_mut() {
            obj.insert(field.into(), value);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.read().get(field).is_some()
    }

    /// Returns a copy of the whole document.
    pub fn snapshot(&self) -> Value {
        self.0.read().clone()
    }

    /// Runs `f` with read access to the document.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.0.read())
    }
}

/// Result of a successful pipeline run.
///
/// `NotAValue` means the property was never provided and nothing required it:
/// it validated, and it has no value. It is distinct from `Value(Value::Null)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    Value(Value),
    NotAValue,
}

impl Validated {
    pub fn is_not_a_value(&self) -> bool {
        matches!(self, Validated::NotAValue)
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Validated::Value(v) => Some(v),
            Validated::NotAValue => None,
        }
    }
}

/// True for `null`, `""`, `[]` and `{}`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Validation state for one property.
pub struct PropertyContext {
    document: Document,
    value: Value,
    property: PropertyPath,
    schema: Arc<PropertySchema>,
    document_schema: Arc<DocumentSchema>,
    property_not_declared: bool,
    session: Arc<dyn Session>,
    errors: ErrorFactory,
}

impl PropertyContext {
    /// Creates the context for validating `value` as `property`.
    ///
    /// `property_not_declared` is true when the input never set the property,
    /// which lets an absent value validate to [`Validated::NotAValue`].
    pub fn new(
        document: Document,
        value: Value,
        property: PropertyPath,
        schema: Arc<PropertySchema>,
        document_schema: Arc<DocumentSchema>,
        property_not_declared: bool,
        session: Arc<dyn Session>,
    ) -> Self {
        let errors = ErrorFactory::new(property.clone());
        Self {
            document,
            value,
            property,
            schema,
            document_schema,
            property_not_declared,
            session,
            errors,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The value as produced by the most recent stage.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub(crate) fn schema_handle(&self) -> Arc<PropertySchema> {
        Arc::clone(&self.schema)
    }

    pub fn document_schema(&self) -> &DocumentSchema {
        &self.document_schema
    }

    pub fn property_not_declared(&self) -> bool {
        self.property_not_declared
    }

    pub fn session(&self) -> &dyn Session {
        &*self.session
    }

    /// Error constructors bound to this property.
    pub fn error(&self) -> &ErrorFactory {
        &self.errors
    }

    /// Resolves a schema expression against this context.
    pub fn resolve(&self, expr: &Resolvable) -> Value {
        resolver::resolve(expr, self)
    }

    /// Resolves an optional expression, treating an absent one as `null`.
    pub fn resolve_opt(&self, expr: Option<&Resolvable>) -> Value {
        expr.map_or(Value::Null, |e| self.resolve(e))
    }
}

impl std::fmt::Debug for PropertyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyContext")
            .field("property", &self.property)
            .field("type_name", &self.schema.type_name())
            .field("value", &self.value)
            .field("property_not_declared", &self.property_not_declared)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(" ")));
        assert!(!is_empty(&json!([null])));
    }

    #[test]
    fn test_document_clones_share_state() {
        let doc = Document::new(json!({"a": 1}));
        let other = doc.clone();
        other.set("b", json!(2));

        assert_eq!(doc.get("b"), Some(json!(2)));
        assert!(doc.contains("a"));
        assert_eq!(doc.snapshot(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_document_set_ignores_non_object() {
        let doc = Document::new(json!([1]));
        doc.set("a", json!(1));
        assert_eq!(doc.snapshot(), json!([1]));
        assert_eq!(doc.with(|v| v.as_array().map(Vec::len)), Some(1));
    }

    #[test]
    fn test_validated_sentinel_differs_from_null() {
        assert_ne!(Validated::NotAValue, Validated::Value(Value::Null));
        assert!(Validated::NotAValue.is_not_a_value());
        assert_eq!(Validated::Value(json!(3)).into_value(), Some(json!(3)));
        assert_eq!(Validated::NotAValue.into_value(), None);
    }
}
