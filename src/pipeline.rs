//! The property validation pipeline.
//!
//! [`PropertyContext::validate`] runs one property through these stages, in
//! order, each reading the value left by the previous one:
//!
//! 1. default resolution
//! 2. not-null check
//! 3. undeclared short-circuit (ends with [`Validated::NotAValue`])
//! 4. type handler lookup
//! 5. "before" converters
//! 6. type validation
//! 7. options membership
//! 8. custom validators
//! 9. "after" converters
//!
//! Data failures end the run with `Ok(Validation::Failure(error))`; a missing
//! type handler ends it with `Err(ValidationFault)`.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, error};

use crate::context::{is_empty, PropertyContext, Validated};
use crate::error::{PropertyError, ValidationFault};
use crate::handlers::TypeHandler;

/// Outcome of validating one property.
pub type PropertyValidation = Validation<Validated, PropertyError>;

/// Result of the stages that run before handler lookup.
enum Step {
    Finished(PropertyValidation),
    Continue,
}

impl PropertyContext {
    /// Validates the property, consuming the context.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFault::HandlerNotFound`] when the session has no
    /// handler for the schema's type. Data problems are never reported here;
    /// they are the `Failure` side of the returned [`PropertyValidation`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use propgate::{
    ///     Document, DocumentSchema, HandlerRegistry, PropertyContext, PropertyPath,
    ///     PropertySchema, Validated, ValidationSession,
    /// };
    /// use serde_json::json;
    ///
    /// # futures::executor::block_on(async {
    /// let schema = Arc::new(PropertySchema::new("number").default_value(42));
    /// let ctx = PropertyContext::new(
    ///     Document::new(json!({})),
    ///     json!(null),
    ///     PropertyPath::new("answer"),
    ///     schema,
    ///     Arc::new(DocumentSchema::new()),
    ///     true,
    ///     Arc::new(ValidationSession::new(HandlerRegistry::with_builtin_handlers())),
    /// );
    ///
    /// let outcome = ctx.validate().await.unwrap();
    /// assert_eq!(outcome.into_result().unwrap(), Validated::Value(json!(42)));
    /// # });
    /// ```
    pub async fn validate(mut self) -> Result<PropertyValidation, ValidationFault> {
        if let Step::Finished(outcome) = self.prepare() {
            return Ok(outcome);
        }

        let handler = self.lookup_handler()?;

        Ok(match self.run_stages(handler.as_ref()).await {
            Ok(value) => Validation::Success(Validated::Value(value)),
            Err(error) => {
                debug!(
                    property = %self.property(),
                    code = %error.code,
                    "property rejected"
                );
                Validation::Failure(error)
            }
        })
    }

    /// Stages 1 to 3.
    fn prepare(&mut self) -> Step {
        self.apply_default();

        if let Err(error) = self.check_not_null() {
            debug!(property = %self.property(), "required property is empty");
            return Step::Finished(Validation::Failure(error));
        }

        if is_empty(self.value()) && self.property_not_declared() {
            debug!(property = %self.property(), "property not declared, skipping");
            return Step::Finished(Validation::Success(Validated::NotAValue));
        }

        Step::Continue
    }

    /// Any declared default counts, `false` and `0` included.
    fn apply_default(&mut self) {
        if !is_empty(self.value()) {
            return;
        }
        if let Some(expr) = self.schema().default_value_expr() {
            let value = self.resolve(expr);
            debug!(property = %self.property(), "adopted default value");
            self.set_value(value);
        }
    }

    fn check_not_null(&self) -> Result<(), PropertyError> {
        let required = self.resolve(self.schema().not_null_expr()) == Value::Bool(true);
        if required && is_empty(self.value()) {
            return Err(self.error().not_null());
        }
        Ok(())
    }

    fn lookup_handler(&self) -> Result<Arc<dyn TypeHandler>, ValidationFault> {
        let type_name = self.schema().type_name();
        self.session().handler(type_name).ok_or_else(|| {
            error!(
                type_name,
                property = %self.property(),
                "no handler registered for schema type"
            );
            ValidationFault::HandlerNotFound {
                type_name: type_name.to_string(),
                property: self.property().clone(),
            }
        })
    }

    /// Stages 5 to 9.
    async fn run_stages(&mut self, handler: &dyn TypeHandler) -> Result<Value, PropertyError> {
        // Converter chains take the context mutably, so hold the schema separately
        let schema = self.schema_handle();

        let value = schema.before_converters().run(self).await?;
        self.set_value(value);

        let value = handler.validate(self).await?;
        self.set_value(value);

        self.check_options()?;

        if let Some(error) = schema.validators().run(self) {
            return Err(error);
        }

        schema.after_converters().run(self).await
    }

    fn check_options(&self) -> Result<(), PropertyError> {
        let Some(expr) = self.schema().options_expr() else {
            return Ok(());
        };

        let allowed = match self.resolve(expr) {
            Value::Null => return Ok(()),
            Value::Array(items) => items,
            single => vec![single],
        };

        if allowed.contains(self.value()) {
            Ok(())
        } else {
            Err(self
                .error()
                .invalid_value()
                .with_expected(format!("one of {}", Value::Array(allowed)))
                .with_got(self.value().to_string()))
        }
    }
}
