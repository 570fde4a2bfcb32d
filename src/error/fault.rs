use crate::path::PropertyPath;

/// A configuration fault that halts validation.
///
/// Faults mean the schema and the session disagree; they say nothing about
/// the data being validated. They travel in the outer `Result` of
/// [`PropertyContext::validate`](crate::PropertyContext::validate), never as a
/// [`PropertyError`](crate::PropertyError), so callers aggregating per-property
/// errors cannot swallow them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFault {
    /// The schema names a type with no registered handler.
    #[error("handler not found for type '{type_name}' (property '{property}')")]
    HandlerNotFound {
        type_name: String,
        property: PropertyPath,
    },
}
