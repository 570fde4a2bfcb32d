//! Error types for property validation.
//!
//! Data failures are values: a [`PropertyError`] describes one rejected
//! property and [`PropertyErrors`] accumulates them across a document.
//! Misconfiguration is reported separately as a [`ValidationFault`] so it can
//! never be mistaken for bad input.

pub mod factory;
mod fault;
mod property_error;

pub use factory::ErrorFactory;
pub use fault::ValidationFault;
pub use property_error::{ErrorKind, PropertyError, PropertyErrors};
