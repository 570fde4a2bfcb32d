use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::error::PropertyError;

/// Transforms the value of a property.
///
/// A converter reads the current value from `ctx.value()` and returns the
/// replacement. It may await I/O, and may reject the value with an error.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use propgate::{Converter, PropertyContext, PropertyError};
/// use serde_json::{json, Value};
///
/// struct Trim;
///
/// #[async_trait]
/// impl Converter for Trim {
///     async fn convert(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
///         Ok(match ctx.value() {
///             Value::String(s) => json!(s.trim()),
///             other => other.clone(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, ctx: &PropertyContext) -> Result<Value, PropertyError>;
}

/// Adapts a synchronous closure into a [`Converter`].
pub struct FnConverter<F>(pub F);

#[async_trait]
impl<F> Converter for FnConverter<F>
where
    F: Fn(&PropertyContext) -> Result<Value, PropertyError> + Send + Sync,
{
    async fn convert(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        (self.0)(ctx)
    }
}

/// Ordered converters of one phase (before or after) of a property.
#[derive(Clone, Default)]
pub struct ConverterChain {
    converters: Vec<Arc<dyn Converter>>,
}

impl ConverterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chain with `converter` appended.
    pub fn with<C>(mut self, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.converters.push(Arc::new(converter));
        self
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Runs the converters in order.
    ///
    /// Each converter sees the previous one's output in `ctx.value()`. The
    /// context holds the final output when this returns `Ok`; an empty
    /// chain leaves the value untouched.
    pub async fn run(&self, ctx: &mut PropertyContext) -> Result<Value, PropertyError> {
        for converter in &self.converters {
            let value = converter.convert(ctx).await?;
            ctx.set_value(value);
        }
        Ok(ctx.value().clone())
    }
}
