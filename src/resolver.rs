//! Literal-or-computed schema values.
//!
//! Several schema fields (not-null flag, default value, options, bounds) may be
//! fixed in the schema or computed from the state of the validation. Both forms
//! are a [`Resolvable`] and are turned into a concrete value by [`resolve`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::PropertyContext;

type ComputeFn = dyn Fn(&PropertyContext) -> Value + Send + Sync;

/// A schema value that is either fixed or computed against the context.
///
/// # Example
///
/// ```rust
/// use propgate::Resolvable;
/// use serde_json::{json, Value};
///
/// let fixed = Resolvable::from(10);
/// let computed = Resolvable::computed(|ctx| {
///     ctx.document().get("max_items").unwrap_or(Value::Null)
/// });
/// # let _ = (fixed, computed);
/// ```
#[derive(Clone)]
pub enum Resolvable {
    Literal(Value),
    Computed(Arc<ComputeFn>),
}

impl Resolvable {
    pub fn literal(value: impl Into<Value>) -> Self {
        Resolvable::Literal(value.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&PropertyContext) -> Value + Send + Sync + 'static,
    {
        Resolvable::Computed(Arc::new(f))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Resolvable::Computed(_))
    }
}

impl fmt::Debug for Resolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Resolvable::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for Resolvable {
    fn from(value: Value) -> Self {
        Resolvable::Literal(value)
    }
}

macro_rules! literal_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Resolvable {
                fn from(value: $t) -> Self {
                    Resolvable::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(bool, i32, i64, u32, u64, usize, f64, &str, String);

/// Produces the concrete value of an expression for the given context.
///
/// Literals are returned as-is; computed expressions are called with the
/// context and may read the document, the value so far, the schemas and the
/// session.
pub fn resolve(expr: &Resolvable, ctx: &PropertyContext) -> Value {
    match expr {
        Resolvable::Literal(value) => value.clone(),
        Resolvable::Computed(f) => f(ctx),
    }
}
