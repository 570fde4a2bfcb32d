//! Custom business rules layered on top of a property's base schema.
//!
//! - [`ValidatorChain`]: synchronous checks run after type validation; the
//!   first error wins.
//! - [`ConverterChain`]: asynchronous value transforms, run either before
//!   type validation or after every check has passed.

mod converters;
mod validators;

pub use converters::{Converter, ConverterChain, FnConverter};
pub use validators::{CustomValidator, FnValidator, ValidatorChain};
