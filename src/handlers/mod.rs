//! Type handlers.
//!
//! A [`TypeHandler`] validates and coerces values of one declared type. The
//! session looks handlers up by the schema's type name. Four handlers ship
//! with the crate:
//!
//! | type name | handler            | constraints                     |
//! |-----------|--------------------|---------------------------------|
//! | `string`  | [`StringHandler`]  | `min_size`, `max_size`, pattern |
//! | `number`  | [`NumberHandler`]  | `min_value`, `max_value`        |
//! | `boolean` | [`BooleanHandler`] |                                 |
//! | `array`   | [`ArrayHandler`]   | `min_size`, `max_size`          |

mod array;
mod boolean;
mod number;
mod string;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::error::PropertyError;
use crate::resolver::Resolvable;

pub use array::ArrayHandler;
pub use boolean::BooleanHandler;
pub use number::NumberHandler;
pub use string::StringHandler;

/// Validates and coerces values of one data type.
///
/// The handler reads the value from `ctx.value()` and returns the value the
/// pipeline continues with, which may have a different representation (for
/// example `"42"` becoming `42`). Rejections are ordinary [`PropertyError`]s,
/// usually built with `ctx.error()`.
#[async_trait]
pub trait TypeHandler: Send + Sync {
    /// The schema type name this handler serves.
    fn type_name(&self) -> &str;

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError>;
}

/// Name of a JSON value's type, for `got` details in errors.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolves a size bound. Anything but a non-negative integer means "no bound".
pub(crate) fn size_bound(ctx: &PropertyContext, expr: Option<&Resolvable>) -> Option<u64> {
    ctx.resolve_opt(expr).as_u64()
}

/// Resolves a value bound. Anything but a number means "no bound".
pub(crate) fn value_bound(ctx: &PropertyContext, expr: Option<&Resolvable>) -> Option<f64> {
    ctx.resolve_opt(expr).as_f64()
}

/// Checks a size against the schema's `min_size`/`max_size`.
pub(crate) fn check_size(
    ctx: &PropertyContext,
    size: u64,
    unit: &str,
) -> Result<(), PropertyError> {
    let schema = ctx.schema();
    if let Some(min) = size_bound(ctx, schema.min_size_expr()) {
        if size < min {
            return Err(ctx
                .error()
                .min_size()
                .with_expected(format!("at least {} {}", min, unit))
                .with_got(format!("{} {}", size, unit)));
        }
    }
    if let Some(max) = size_bound(ctx, schema.max_size_expr()) {
        if size > max {
            return Err(ctx
                .error()
                .max_size()
                .with_expected(format!("at most {} {}", max, unit))
                .with_got(format!("{} {}", size, unit)));
        }
    }
    Ok(())
}

/// Invalid-value error for a value of the wrong type.
pub(crate) fn type_mismatch(ctx: &PropertyContext, expected: &str) -> PropertyError {
    ctx.error()
        .invalid_value()
        .with_expected(expected.to_string())
        .with_got(value_type_name(ctx.value()))
}
