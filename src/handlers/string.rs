//! String handler.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::error::PropertyError;

use super::{check_size, type_mismatch, TypeHandler};

/// Handler for `string` properties.
///
/// `null` passes through. Numbers and booleans are coerced to their string
/// form; other types are rejected. Length is counted in Unicode scalar values and checked against
/// `min_size`/`max_size`. A schema pattern must match somewhere in the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringHandler;

#[async_trait]
impl TypeHandler for StringHandler {
    fn type_name(&self) -> &str {
        "string"
    }

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        let s = match ctx.value() {
            Value::Null => return Ok(Value::Null),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(type_mismatch(ctx, "string")),
        };

        check_size(ctx, s.chars().count() as u64, "characters")?;

        if let Some(regex) = ctx.schema().pattern_regex() {
            if !regex.is_match(&s) {
                return Err(ctx
                    .error()
                    .invalid_value()
                    .with_expected(format!("string matching pattern '{}'", regex.as_str()))
                    .with_got(s));
            }
        }

        Ok(Value::String(s))
    }
}
