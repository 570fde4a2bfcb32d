//! Property schema.
//!
//! This module provides [`PropertySchema`], the description of one property:
//! its declared type, its constraints and the custom rules layered on top.

use regex::Regex;
use serde_json::Value;

use crate::context::PropertyContext;
use crate::custom::{
    Converter, ConverterChain, CustomValidator, FnConverter, FnValidator, ValidatorChain,
};
use crate::error::PropertyError;
use crate::resolver::Resolvable;

/// Schema of a single property.
///
/// Constraint values are [`Resolvable`], so each may be fixed or computed
/// from the validation state. The type name selects the handler from the
/// session's registry at validation time.
///
/// # Example
///
/// ```rust
/// use propgate::PropertySchema;
/// use serde_json::json;
///
/// let schema = PropertySchema::new("string")
///     .not_null(true)
///     .default_value("guest")
///     .options(json!(["guest", "admin"]))
///     .max_size(16)
///     .after_with(|ctx| Ok(json!(ctx.value().as_str().unwrap_or("").to_uppercase())));
///
/// assert_eq!(schema.type_name(), "string");
/// ```
#[derive(Clone)]
pub struct PropertySchema {
    type_name: String,
    not_null: Resolvable,
    default_value: Option<Resolvable>,
    options: Option<Resolvable>,
    min_size: Option<Resolvable>,
    max_size: Option<Resolvable>,
    min_value: Option<Resolvable>,
    max_value: Option<Resolvable>,
    pattern: Option<Regex>,
    validators: ValidatorChain,
    before: ConverterChain,
    after: ConverterChain,
}

impl PropertySchema {
    /// Creates a schema for the given type with no constraints.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            not_null: Resolvable::from(false),
            default_value: None,
            options: None,
            min_size: None,
            max_size: None,
            min_value: None,
            max_value: None,
            pattern: None,
            validators: ValidatorChain::new(),
            before: ConverterChain::new(),
            after: ConverterChain::new(),
        }
    }

    /// Requires a non-empty value. Only a resolved `true` enforces it.
    pub fn not_null(mut self, expr: impl Into<Resolvable>) -> Self {
        self.not_null = expr.into();
        self
    }

    /// Value adopted when the input is empty.
    pub fn default_value(mut self, expr: impl Into<Resolvable>) -> Self {
        self.default_value = Some(expr.into());
        self
    }

    /// Allowed values. Should resolve to an array; `null` lifts the restriction.
    pub fn options(mut self, expr: impl Into<Resolvable>) -> Self {
        self.options = Some(expr.into());
        self
    }

    pub fn min_size(mut self, expr: impl Into<Resolvable>) -> Self {
        self.min_size = Some(expr.into());
        self
    }

    pub fn max_size(mut self, expr: impl Into<Resolvable>) -> Self {
        self.max_size = Some(expr.into());
        self
    }

    pub fn min_value(mut self, expr: impl Into<Resolvable>) -> Self {
        self.min_value = Some(expr.into());
        self
    }

    pub fn max_value(mut self, expr: impl Into<Resolvable>) -> Self {
        self.max_value = Some(expr.into());
        self
    }

    /// Regex the string handler checks values against.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Appends a custom validator.
    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: CustomValidator + 'static,
    {
        self.validators = self.validators.with(validator);
        self
    }

    /// Appends a custom validator written as a closure.
    pub fn validate_with<F>(self, f: F) -> Self
    where
        F: Fn(&PropertyContext) -> Option<PropertyError> + Send + Sync + 'static,
    {
        self.validator(FnValidator(f))
    }

    /// Appends a converter run before type validation.
    pub fn before<C>(mut self, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.before = self.before.with(converter);
        self
    }

    pub fn before_with<F>(self, f: F) -> Self
    where
        F: Fn(&PropertyContext) -> Result<Value, PropertyError> + Send + Sync + 'static,
    {
        self.before(FnConverter(f))
    }

    /// Appends a converter run after every check has passed.
    pub fn after<C>(mut self, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.after = self.after.with(converter);
        self
    }

    pub fn after_with<F>(self, f: F) -> Self
    where
        F: Fn(&PropertyContext) -> Result<Value, PropertyError> + Send + Sync + 'static,
    {
        self.after(FnConverter(f))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn not_null_expr(&self) -> &Resolvable {
        &self.not_null
    }

    pub fn default_value_expr(&self) -> Option<&Resolvable> {
        self.default_value.as_ref()
    }

    pub fn options_expr(&self) -> Option<&Resolvable> {
        self.options.as_ref()
    }

    pub fn min_size_expr(&self) -> Option<&Resolvable> {
        self.min_size.as_ref()
    }

    pub fn max_size_expr(&self) -> Option<&Resolvable> {
        self.max_size.as_ref()
    }

    pub fn min_value_expr(&self) -> Option<&Resolvable> {
        self.min_value.as_ref()
    }

    pub fn max_value_expr(&self) -> Option<&Resolvable> {
        self.max_value.as_ref()
    }

    pub fn pattern_regex(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn validators(&self) -> &ValidatorChain {
        &self.validators
    }

    pub fn before_converters(&self) -> &ConverterChain {
        &self.before
    }

    pub fn after_converters(&self) -> &ConverterChain {
        &self.after
    }
}

impl std::fmt::Debug for PropertySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySchema")
            .field("type_name", &self.type_name)
            .field("not_null", &self.not_null)
            .field("default_value", &self.default_value)
            .field("options", &self.options)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("validators", &self.validators.len())
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish_non_exhaustive()
    }
}
