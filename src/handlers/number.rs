//! Number handler.

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::context::PropertyContext;
use crate::error::PropertyError;

use super::{type_mismatch, value_bound, TypeHandler};

/// Handler for `number` properties.
///
/// Accepts JSON numbers and numeric strings. A string holding an integer
/// becomes an integer, any other numeric string a float. NaN and infinities
/// are rejected. The result is checked against `min_value`/`max_value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberHandler;

#[async_trait]
impl TypeHandler for NumberHandler {
    fn type_name(&self) -> &str {
        "number"
    }

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        let number = match ctx.value() {
            Value::Null => return Ok(Value::Null),
            Value::Number(n) => n.clone(),
            Value::String(s) => parse_number(s.trim()).ok_or_else(|| {
                ctx.error()
                    .invalid_value()
                    .with_expected("number")
                    .with_got(format!("\"{}\"", s))
            })?,
            _ => return Err(type_mismatch(ctx, "number")),
        };

        // Every finite serde_json number has an f64 view
        let n = number.as_f64().unwrap_or(f64::NAN);
        let schema = ctx.schema();

        if let Some(min) = value_bound(ctx, schema.min_value_expr()) {
            if n < min {
                return Err(ctx
                    .error()
                    .min_value()
                    .with_expected(format!("at least {}", min))
                    .with_got(number.to_string()));
            }
        }
        if let Some(max) = value_bound(ctx, schema.max_value_expr()) {
            if n > max {
                return Err(ctx
                    .error()
                    .max_value()
                    .with_expected(format!("at most {}", max))
                    .with_got(number.to_string()));
            }
        }

        Ok(Value::Number(number))
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolvable;
    use crate::test_support::context_for;
    use crate::{ErrorKind, PropertySchema};
    use serde_json::json;

    async fn run(schema: PropertySchema, value: Value) -> Result<Value, PropertyError> {
        NumberHandler.validate(&context_for(schema, value)).await
    }

    #[tokio::test]
    async fn test_accepts_numbers() {
        assert_eq!(run(PropertySchema::new("number"), json!(7)).await.unwrap(), json!(7));
        assert_eq!(run(PropertySchema::new("number"), json!(-1.5)).await.unwrap(), json!(-1.5));
    }

    #[tokio::test]
    async fn test_coerces_numeric_strings() {
        assert_eq!(run(PropertySchema::new("number"), json!(" 42 ")).await.unwrap(), json!(42));
        assert_eq!(run(PropertySchema::new("number"), json!("2.5")).await.unwrap(), json!(2.5));
    }

    #[tokio::test]
    async fn test_rejects_non_numeric() {
        let error = run(PropertySchema::new("number"), json!("abc")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidValue);

        let error = run(PropertySchema::new("number"), json!("NaN")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidValue);

        let error = run(PropertySchema::new("number"), json!([1])).await.unwrap_err();
        assert_eq!(error.got.as_deref(), Some("array"));
    }

    #[tokio::test]
    async fn test_null_passes_through_bounds() {
        let schema = PropertySchema::new("number").min_value(1);
        assert_eq!(run(schema, Value::Null).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_bounds_are_inclusive() {
        let schema = PropertySchema::new("number").min_value(0).max_value(10);
        assert!(run(schema.clone(), json!(0)).await.is_ok());
        assert!(run(schema.clone(), json!(10)).await.is_ok());

        let error = run(schema.clone(), json!(-1)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MinValue);

        let error = run(schema, json!(10.5)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MaxValue);
        assert_eq!(error.got.as_deref(), Some("10.5"));
    }

    #[tokio::test]
    async fn test_computed_bound() {
        let schema = PropertySchema::new("number").max_value(Resolvable::computed(|ctx| {
            ctx.document().get("limit").unwrap_or(Value::Null)
        }));
        // test_support documents carry {"limit": 5}
        let error = run(schema, json!(6)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MaxValue);
    }
}
