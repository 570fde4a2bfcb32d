//! Boolean handler.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::error::PropertyError;

use super::{type_mismatch, TypeHandler};

/// Handler for `boolean` properties.
///
/// Accepts booleans and the strings `"true"`/`"false"` in any case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanHandler;

#[async_trait]
impl TypeHandler for BooleanHandler {
    fn type_name(&self) -> &str {
        "boolean"
    }

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        match ctx.value() {
            Value::Null => Ok(Value::Null),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(type_mismatch(ctx, "boolean")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context_for;
    use crate::PropertySchema;
    use serde_json::json;

    async fn run(value: Value) -> Result<Value, PropertyError> {
        BooleanHandler
            .validate(&context_for(PropertySchema::new("boolean"), value))
            .await
    }

    #[tokio::test]
    async fn test_accepts_booleans_and_words() {
        assert_eq!(run(json!(false)).await.unwrap(), json!(false));
        assert_eq!(run(json!("TRUE")).await.unwrap(), json!(true));
        assert_eq!(run(json!("False")).await.unwrap(), json!(false));
    }

    #[tokio::test]
    async fn test_rejects_others() {
        assert!(run(json!("yes")).await.is_err());
        assert!(run(json!(1)).await.is_err());
    }
}
