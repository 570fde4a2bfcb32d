//! Array handler.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::error::PropertyError;

use super::{check_size, type_mismatch, TypeHandler};

/// Handler for `array` properties.
///
/// Checks the element count against `min_size`/`max_size`. Elements are
/// passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayHandler;

#[async_trait]
impl TypeHandler for ArrayHandler {
    fn type_name(&self) -> &str {
        "array"
    }

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        let items = match ctx.value() {
            Value::Null => return Ok(Value::Null),
            Value::Array(items) => items,
            _ => return Err(type_mismatch(ctx, "array")),
        };

        check_size(ctx, items.len() as u64, "items")?;
        Ok(Value::Array(items.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context_for;
    use crate::{ErrorKind, PropertySchema};
    use serde_json::json;

    async fn run(schema: PropertySchema, value: Value) -> Result<Value, PropertyError> {
        ArrayHandler.validate(&context_for(schema, value)).await
    }

    #[tokio::test]
    async fn test_size_bounds() {
        let schema = PropertySchema::new("array").min_size(1).max_size(2);
        assert_eq!(run(schema.clone(), json!([1, 2])).await.unwrap(), json!([1, 2]));

        let error = run(schema.clone(), json!([1, 2, 3])).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MaxSize);
        assert_eq!(error.got.as_deref(), Some("3 items"));

        let error = run(schema, json!([])).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MinSize);
    }

    #[tokio::test]
    async fn test_rejects_scalar() {
        let error = run(PropertySchema::new("array"), json!("a,b")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidValue);
        assert_eq!(error.got.as_deref(), Some("string"));
    }
}
