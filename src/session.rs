//! Validation sessions.
//!
//! A [`Session`] is what a pipeline run consults for its type handler. It can
//! also expose session-scoped attributes (the current user, a tenant id, a
//! clock) to computed schema expressions and custom rules.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::handlers::TypeHandler;
use crate::registry::HandlerRegistry;

/// Session services consumed by the pipeline.
pub trait Session: Send + Sync {
    /// Returns the handler for a schema type name, if one is registered.
    fn handler(&self, type_name: &str) -> Option<Arc<dyn TypeHandler>>;

    /// Returns a session-scoped attribute.
    fn attribute(&self, _key: &str) -> Option<Value> {
        None
    }
}

/// A [`Session`] backed by a [`HandlerRegistry`] and a fixed attribute map.
///
/// # Example
///
/// ```rust
/// use propgate::{HandlerRegistry, Session, ValidationSession};
/// use serde_json::json;
///
/// let session = ValidationSession::new(HandlerRegistry::with_builtin_handlers())
///     .with_attribute("user", json!("alice"));
///
/// assert!(session.handler("string").is_some());
/// assert_eq!(session.attribute("user"), Some(json!("alice")));
/// ```
#[derive(Clone, Default)]
pub struct ValidationSession {
    registry: HandlerRegistry,
    attributes: HashMap<String, Value>,
}

impl ValidationSession {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

impl Session for ValidationSession {
    fn handler(&self, type_name: &str) -> Option<Arc<dyn TypeHandler>> {
        self.registry.get(type_name)
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_session_has_no_handlers() {
        let session = ValidationSession::default();
        assert!(session.handler("string").is_none());
        assert!(session.attribute("anything").is_none());
    }

    #[test]
    fn test_session_sees_later_registrations() {
        let registry = HandlerRegistry::new();
        let session = ValidationSession::new(registry.clone());
        registry.register(crate::handlers::StringHandler).unwrap();

        assert!(session.handler("string").is_some());
        assert!(session.registry().contains("string"));
    }

    #[test]
    fn test_attributes() {
        let session = ValidationSession::default()
            .with_attribute("tenant", json!(7))
            .with_attribute("tenant", json!(8));
        assert_eq!(session.attribute("tenant"), Some(json!(8)));
    }
}
