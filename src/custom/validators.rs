use std::sync::Arc;

use crate::context::PropertyContext;
use crate::error::PropertyError;

/// A business rule checked against the validation context.
///
/// Validators build their own errors, usually through `ctx.error()`, and
/// decide their classification themselves.
///
/// # Example
///
/// ```rust
/// use propgate::{CustomValidator, PropertyContext, PropertyError};
///
/// struct EvenOnly;
///
/// impl CustomValidator for EvenOnly {
///     fn validate(&self, ctx: &PropertyContext) -> Option<PropertyError> {
///         match ctx.value().as_i64() {
///             Some(n) if n % 2 != 0 => Some(ctx.error().custom("must be even", "not_even")),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait CustomValidator: Send + Sync {
    /// Returns an error if the current value breaks the rule.
    fn validate(&self, ctx: &PropertyContext) -> Option<PropertyError>;
}

/// Adapts a closure into a [`CustomValidator`].
pub struct FnValidator<F>(pub F);

impl<F> CustomValidator for FnValidator<F>
where
    F: Fn(&PropertyContext) -> Option<PropertyError> + Send + Sync,
{
    fn validate(&self, ctx: &PropertyContext) -> Option<PropertyError> {
        (self.0)(ctx)
    }
}

/// Ordered custom validators of one property.
#[derive(Clone, Default)]
pub struct ValidatorChain {
    validators: Vec<Arc<dyn CustomValidator>>,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chain with `validator` appended.
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: CustomValidator + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs the validators in order and returns the first error.
    pub fn run(&self, ctx: &PropertyContext) -> Option<PropertyError> {
        self.validators.iter().find_map(|v| v.validate(ctx))
    }
}
