//! Constructors for property errors.
//!
//! The free functions build errors for any property. [`ErrorFactory`] binds
//! them to one property so code running inside a pipeline (handlers, custom
//! validators, converters) can mint errors without repeating the path.

use crate::path::PropertyPath;

use super::{ErrorKind, PropertyError};

/// Builds a custom error with an optional message and code.
///
/// The code defaults to `validation_error`.
pub fn create_error(
    property: &PropertyPath,
    message: Option<&str>,
    code: Option<&str>,
) -> PropertyError {
    let mut error = PropertyError::new(property.clone(), ErrorKind::Custom);
    if let Some(message) = message {
        error = error.with_message(message);
    }
    if let Some(code) = code {
        error = error.with_code(code);
    }
    error
}

pub fn not_null(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::NotNull)
}

pub fn invalid_value(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::InvalidValue)
}

pub fn max_size(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::MaxSize)
}

pub fn min_size(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::MinSize)
}

pub fn max_value(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::MaxValue)
}

pub fn min_value(property: &PropertyPath) -> PropertyError {
    PropertyError::new(property.clone(), ErrorKind::MinValue)
}

/// Error constructors bound to the property under validation.
///
/// Every [`PropertyContext`](crate::PropertyContext) owns one, built when the
/// context is created and reachable through `ctx.error()`.
///
/// # Example
///
/// ```rust
/// use propgate::{ErrorFactory, ErrorKind, PropertyPath};
///
/// let errors = ErrorFactory::new(PropertyPath::new("quantity"));
///
/// assert_eq!(errors.max_value().kind, ErrorKind::MaxValue);
/// assert_eq!(errors.code("out_of_stock").code, "out_of_stock");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFactory {
    property: PropertyPath,
}

impl ErrorFactory {
    pub fn new(property: PropertyPath) -> Self {
        Self { property }
    }

    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    /// An error with a custom message and code.
    pub fn custom(&self, message: impl AsRef<str>, code: impl AsRef<str>) -> PropertyError {
        create_error(
            &self.property,
            Some(message.as_ref()),
            Some(code.as_ref()),
        )
    }

    /// An error carrying only a code.
    pub fn code(&self, code: impl AsRef<str>) -> PropertyError {
        create_error(&self.property, None, Some(code.as_ref()))
    }

    pub fn not_null(&self) -> PropertyError {
        not_null(&self.property)
    }

    pub fn invalid_value(&self) -> PropertyError {
        invalid_value(&self.property)
    }

    pub fn max_size(&self) -> PropertyError {
        max_size(&self.property)
    }

    pub fn min_size(&self) -> PropertyError {
        min_size(&self.property)
    }

    pub fn max_value(&self) -> PropertyError {
        max_value(&self.property)
    }

    pub fn min_value(&self) -> PropertyError {
        min_value(&self.property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_defaults() {
        let error = create_error(&PropertyPath::new("x"), None, None);
        assert_eq!(error.kind, ErrorKind::Custom);
        assert_eq!(error.code, "validation_error");
        assert!(error.message.is_none());
    }

    #[test]
    fn test_factory_is_bound_to_property() {
        let property = PropertyPath::new("address").child("zip");
        let errors = ErrorFactory::new(property.clone());

        for error in [
            errors.not_null(),
            errors.invalid_value(),
            errors.max_size(),
            errors.min_size(),
            errors.max_value(),
            errors.min_value(),
            errors.code("bad_zip"),
            errors.custom("zip code unknown", "unknown_zip"),
        ] {
            assert_eq!(error.property, property);
        }
    }

    #[test]
    fn test_factory_codes() {
        let errors = ErrorFactory::new(PropertyPath::new("n"));
        assert_eq!(errors.not_null().code, "not_null");
        assert_eq!(errors.invalid_value().code, "invalid_value");
        assert_eq!(errors.max_size().code, "max_size");
        assert_eq!(errors.min_size().code, "min_size");
        assert_eq!(errors.max_value().code, "max_value");
        assert_eq!(errors.min_value().code, "min_value");
    }

    #[test]
    fn test_custom_keeps_message_and_code() {
        let error = ErrorFactory::new(PropertyPath::new("n")).custom("too odd", "odd");
        assert_eq!(error.message.as_deref(), Some("too odd"));
        assert_eq!(error.code, "odd");
        assert_eq!(error.kind, ErrorKind::Custom);
    }
}
