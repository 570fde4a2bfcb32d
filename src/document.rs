//! Whole-document validation.
//!
//! [`DocumentValidator`] runs one property pipeline per schema property and
//! accumulates every rejection, so callers see all problems at once.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::context::{Document, PropertyContext, Validated};
use crate::error::{ErrorFactory, PropertyError, PropertyErrors, ValidationFault};
use crate::path::PropertyPath;
use crate::schema::DocumentSchema;
use crate::session::Session;
use crate::ValidationResult;

const DEFAULT_CONCURRENCY: usize = 32;

/// Validates documents against a [`DocumentSchema`].
///
/// Property pipelines run concurrently, each over its own context. All of
/// them share one [`Document`] handle built from the input, so rules that
/// write to the document are visible to the others.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use propgate::{DocumentSchema, DocumentValidator, HandlerRegistry, PropertySchema, ValidationSession};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let schema = DocumentSchema::new()
///     .property("name", PropertySchema::new("string").not_null(true))
///     .property("age", PropertySchema::new("number").min_value(0));
/// let session = ValidationSession::new(HandlerRegistry::with_builtin_handlers());
///
/// let validator = DocumentValidator::new(schema, Arc::new(session));
///
/// let result = validator.validate(&json!({"name": "Alice", "age": "30"})).await.unwrap();
/// let expected = json!({"name": "Alice", "age": 30}).as_object().cloned().unwrap();
/// assert_eq!(result.into_result().unwrap(), expected);
///
/// let result = validator.validate(&json!({"age": -1})).await.unwrap();
/// assert_eq!(result.into_result().unwrap_err().len(), 2);
/// # });
/// ```
pub struct DocumentValidator {
    schema: Arc<DocumentSchema>,
    session: Arc<dyn Session>,
    concurrency: usize,
}

impl DocumentValidator {
    pub fn new(schema: DocumentSchema, session: Arc<dyn Session>) -> Self {
        Self {
            schema: Arc::new(schema),
            session,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets how many property pipelines may be in flight at once.
    ///
    /// The default is 32. Zero is treated as one.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    /// Validates a document.
    ///
    /// On success the output holds every validated property, except those
    /// that were absent and optional, followed by input properties the schema
    /// does not know, unchanged. On failure it holds one error per rejected
    /// property, in schema order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationFault`] raised by any property; faults
    /// are never folded into the accumulated errors. Pipelines still running
    /// when a fault surfaces are dropped unfinished.
    pub async fn validate(
        &self,
        input: &Value,
    ) -> Result<ValidationResult<Map<String, Value>>, ValidationFault> {
        let Some(obj) = input.as_object() else {
            let error = ErrorFactory::new(PropertyPath::root())
                .invalid_value()
                .with_expected("object");
            return Ok(Validation::Failure(PropertyErrors::single(error)));
        };

        let document = Document::new(input.clone());
        let contexts: Vec<(String, PropertyContext)> = self
            .schema
            .iter()
            .map(|(name, schema)| {
                let ctx = PropertyContext::new(
                    document.clone(),
                    obj.get(name).cloned().unwrap_or(Value::Null),
                    PropertyPath::new(name),
                    Arc::clone(schema),
                    Arc::clone(&self.schema),
                    !obj.contains_key(name),
                    Arc::clone(&self.session),
                );
                (name.to_string(), ctx)
            })
            .collect();

        debug!(
            properties = contexts.len(),
            concurrency = self.concurrency,
            "validating document"
        );

        // `buffered` keeps results in schema order; `try_collect` stops at the
        // first fault and drops the pipelines still in flight
        let outcomes: Vec<_> = stream::iter(contexts)
            .map(|(name, ctx)| async move { ctx.validate().await.map(|o| (name, o)) })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut validated = Map::new();
        let mut errors: Vec<PropertyError> = Vec::new();

        for (name, outcome) in outcomes {
            match outcome {
                Validation::Success(Validated::Value(value)) => {
                    validated.insert(name, value);
                }
                Validation::Success(Validated::NotAValue) => {}
                Validation::Failure(error) => errors.push(error),
            }
        }

        if let Some(errors) = PropertyErrors::from_vec(errors) {
            debug!(rejected = errors.len(), "document rejected");
            return Ok(Validation::Failure(errors));
        }

        for (key, value) in obj {
            if !self.schema.contains(key) {
                validated.insert(key.clone(), value.clone());
            }
        }

        Ok(Validation::Success(validated))
    }
}
