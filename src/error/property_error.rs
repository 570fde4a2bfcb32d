//! Property validation error types.
//!
//! This module provides [`PropertyError`] for a single rejected property and
//! [`PropertyErrors`] for accumulating the failures of a whole document.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::PropertyPath;

/// Classification of a property error.
///
/// The fixed kinds carry a canonical code; [`ErrorKind::Custom`] is used for
/// errors minted by business rules with their own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotNull,
    InvalidValue,
    MaxSize,
    MinSize,
    MaxValue,
    MinValue,
    Custom,
}

impl ErrorKind {
    /// The machine-readable code used for errors of this kind.
    ///
    /// Custom errors default to `validation_error` unless a code is supplied.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotNull => "not_null",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::MaxSize => "max_size",
            ErrorKind::MinSize => "min_size",
            ErrorKind::MaxValue => "max_value",
            ErrorKind::MinValue => "min_value",
            ErrorKind::Custom => "validation_error",
        }
    }

    /// The message template for fixed kinds.
    pub fn default_message(self) -> Option<&'static str> {
        match self {
            ErrorKind::NotNull => Some("value is required"),
            ErrorKind::InvalidValue => Some("invalid value"),
            ErrorKind::MaxSize => Some("size is above the maximum allowed"),
            ErrorKind::MinSize => Some("size is below the minimum allowed"),
            ErrorKind::MaxValue => Some("value is above the maximum allowed"),
            ErrorKind::MinValue => Some("value is below the minimum allowed"),
            ErrorKind::Custom => None,
        }
    }
}

/// A rejected property.
///
/// - **property**: which property was rejected
/// - **kind**: the classification
/// - **code**: machine-readable code (canonical for fixed kinds)
/// - **message**: human-readable description, absent for code-only errors
/// - **got** / **expected**: optional detail filled in by type handlers
///
/// # Example
///
/// ```rust
/// use propgate::{ErrorKind, PropertyError, PropertyPath};
///
/// let error = PropertyError::new(PropertyPath::new("age"), ErrorKind::MinValue)
///     .with_got("-5")
///     .with_expected("at least 0");
///
/// assert_eq!(error.code, "min_value");
/// assert_eq!(error.to_string(), "age: value is below the minimum allowed (expected: at least 0) (got: -5)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyError {
    pub property: PropertyPath,
    pub kind: ErrorKind,
    pub code: String,
    pub message: Option<String>,
    pub got: Option<String>,
    pub expected: Option<String>,
}

impl PropertyError {
    /// Creates an error of the given kind with its canonical code and message.
    pub fn new(property: PropertyPath, kind: ErrorKind) -> Self {
        Self {
            property,
            kind,
            code: kind.code().to_string(),
            message: kind.default_message().map(str::to_string),
            got: None,
            expected: None,
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replaces the code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = if self.property.is_root() {
            "(document)".to_string()
        } else {
            self.property.to_string()
        };

        match &self.message {
            Some(message) => write!(f, "{}: {}", property, message)?,
            None => write!(f, "{}: [{}]", property, self.code)?,
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for PropertyError {}

// Pipelines may run on any tokio worker, so errors must cross threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<PropertyError>();
    assert_sync::<PropertyError>();
};

/// A non-empty collection of property errors.
///
/// Document validation accumulates one entry per rejected property. The
/// collection is a `Semigroup`, so results of independent pipelines combine:
///
/// ```rust
/// use propgate::{ErrorKind, PropertyError, PropertyErrors, PropertyPath};
/// use stillwater::prelude::*;
///
/// let name = PropertyErrors::single(PropertyError::new(PropertyPath::new("name"), ErrorKind::NotNull));
/// let age = PropertyErrors::single(PropertyError::new(PropertyPath::new("age"), ErrorKind::MinValue));
///
/// assert_eq!(name.combine(age).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyErrors(NonEmptyVec<PropertyError>);

impl PropertyErrors {
    pub fn single(error: PropertyError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Builds a collection from a vec, or `None` if it is empty.
    pub fn from_vec(errors: Vec<PropertyError>) -> Option<Self> {
        let mut iter = errors.into_iter();
        let first = Self::single(iter.next()?);
        Some(iter.fold(first, |acc, e| acc.combine(Self::single(e))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyError> {
        self.0.iter()
    }

    pub fn first(&self) -> &PropertyError {
        self.0.head()
    }

    /// Errors reported against the given property.
    pub fn for_property(&self, property: &PropertyPath) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| &e.property == property).collect()
    }

    /// Errors of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<PropertyError> {
        self.0.into_vec()
    }
}

impl Semigroup for PropertyErrors {
    fn combine(self, other: Self) -> Self {
        PropertyErrors(self.0.combine(other.0))
    }
}

impl From<PropertyError> for PropertyErrors {
    fn from(error: PropertyError) -> Self {
        Self::single(error)
    }
}

impl Display for PropertyErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} propert(y/ies) rejected:", self.len())?;
        for error in self.iter() {
            writeln!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for PropertyErrors {}

impl IntoIterator for PropertyErrors {
    type Item = PropertyError;
    type IntoIter = std::vec::IntoIter<PropertyError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
