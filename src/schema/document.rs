//! Document schema: the ordered set of property schemas of one document type.

use std::sync::Arc;

use indexmap::IndexMap;

use super::PropertySchema;

/// Schema of a whole document.
///
/// Properties keep their declaration order, which is also the order in which
/// document validation reports errors.
#[derive(Debug, Clone, Default)]
pub struct DocumentSchema {
    properties: IndexMap<String, Arc<PropertySchema>>,
}

impl DocumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property. Redeclaring a name replaces its schema in place.
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), Arc::new(schema));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<PropertySchema>> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<PropertySchema>)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = DocumentSchema::new()
            .property("zeta", PropertySchema::new("string"))
            .property("alpha", PropertySchema::new("number"))
            .property("mid", PropertySchema::new("boolean"));

        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclaration_replaces() {
        let schema = DocumentSchema::new()
            .property("a", PropertySchema::new("string"))
            .property("a", PropertySchema::new("number"));

        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("a").map(|s| s.type_name()), Some("number"));
        assert!(schema.contains("a"));
        assert!(!schema.contains("b"));
    }
}
