//! Type handler registry.
//!
//! This module provides [`HandlerRegistry`], which maps schema type names to
//! the [`TypeHandler`] that validates them.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::handlers::{ArrayHandler, BooleanHandler, NumberHandler, StringHandler, TypeHandler};

/// Type alias for the handler storage map.
type HandlerMap = Arc<RwLock<HashMap<String, Arc<dyn TypeHandler>>>>;

/// A thread-safe registry of type handlers.
///
/// Clones share the same storage, so a registry handed to several sessions
/// sees later registrations everywhere. Lookups take a read lock; the lock is
/// released before any handler runs.
///
/// # Example
///
/// ```rust
/// use propgate::{HandlerRegistry, StringHandler};
///
/// let registry = HandlerRegistry::new();
/// registry.register(StringHandler).unwrap();
///
/// assert!(registry.get("string").is_some());
/// assert!(registry.get("number").is_none());
///
/// // Duplicate registration fails
/// assert!(registry.register(StringHandler).is_err());
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HandlerMap,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `string`, `number`, `boolean` and
    /// `array` handlers.
    pub fn with_builtin_handlers() -> Self {
        let registry = Self::new();
        let builtins: [Arc<dyn TypeHandler>; 4] = [
            Arc::new(StringHandler),
            Arc::new(NumberHandler),
            Arc::new(BooleanHandler),
            Arc::new(ArrayHandler),
        ];
        {
            let mut handlers = registry.handlers.write();
            for handler in builtins {
                handlers.insert(handler.type_name().to_string(), handler);
            }
        }
        registry
    }

    /// Registers a handler under its own type name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the type name is taken.
    pub fn register<H>(&self, handler: H) -> Result<(), RegistryError>
    where
        H: TypeHandler + 'static,
    {
        let name = handler.type_name().to_string();
        let mut handlers = self.handlers.write();

        if handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateHandler(name));
        }

        tracing::debug!(type_name = %name, "registered type handler");
        handlers.insert(name, Arc::new(handler));
        Ok(())
    }

    /// Registers a handler, replacing any handler of the same type name.
    ///
    /// Returns the replaced handler.
    pub fn replace<H>(&self, handler: H) -> Option<Arc<dyn TypeHandler>>
    where
        H: TypeHandler + 'static,
    {
        let name = handler.type_name().to_string();
        self.handlers.write().insert(name, Arc::new(handler))
    }

    /// Retrieves the handler for a type name.
    pub fn get(&self, type_name: &str) -> Option<Arc<dyn TypeHandler>> {
        self.handlers.read().get(type_name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.handlers.read().contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a handler for a type name that already has one.
    #[error("handler for type '{0}' already registered")]
    DuplicateHandler(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_type_names() {
        let registry = HandlerRegistry::with_builtin_handlers();
        assert_eq!(
            registry.type_names(),
            vec!["array", "boolean", "number", "string"]
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = HandlerRegistry::new();
        let clone = registry.clone();
        clone.register(NumberHandler).unwrap();

        assert!(registry.contains("number"));
    }

    #[test]
    fn test_replace_returns_previous() {
        let registry = HandlerRegistry::with_builtin_handlers();
        let previous = registry.replace(StringHandler);
        assert_eq!(previous.map(|h| h.type_name().to_string()), Some("string".to_string()));
        assert!(HandlerRegistry::new().replace(StringHandler).is_none());
    }

    #[test]
    fn test_duplicate_error_message() {
        let registry = HandlerRegistry::with_builtin_handlers();
        let error = registry.register(BooleanHandler).unwrap_err();
        assert_eq!(error.to_string(), "handler for type 'boolean' already registered");
    }
}
