//! Property identifiers.
//!
//! A [`PropertyPath`] names the property a pipeline run is validating. Most
//! properties are a single field (`email`), but handlers for nested documents
//! can address deeper locations such as `address.lines[1]`.

use std::fmt::{self, Display};
use std::str::FromStr;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field.
    Field(String),
    /// A position inside an array.
    Index(usize),
}

/// Identifies a property within a document.
///
/// # Example
///
/// ```rust
/// use propgate::PropertyPath;
///
/// let path = PropertyPath::new("address").child("lines").index(1);
/// assert_eq!(path.to_string(), "address.lines[1]");
/// assert_eq!(path.name(), Some("lines"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Creates a path naming a single top-level property.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// The document itself, used for errors that are not tied to one property.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an array position appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Parses dotted notation such as `items[0].sku`.
    ///
    /// Returns `None` for malformed input (empty field names, unterminated or
    /// non-numeric indexes). The empty string parses to the root path.
    pub fn parse(input: &str) -> Option<Self> {
        let mut segments = Vec::new();
        if input.is_empty() {
            return Some(Self { segments });
        }

        for part in input.split('.') {
            let (field, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            // A leading index is only valid at the very start: `[0].name`
            if field.is_empty() && !(segments.is_empty() && !rest.is_empty()) {
                return None;
            }
            if !field.is_empty() {
                segments.push(PathSegment::Field(field.to_string()));
            }

            while !rest.is_empty() {
                let close = rest.find(']')?;
                if !rest.starts_with('[') {
                    return None;
                }
                let idx = rest[1..close].parse::<usize>().ok()?;
                segments.push(PathSegment::Index(idx));
                rest = &rest[close + 1..];
            }
        }

        Some(Self { segments })
    }

    /// The innermost field name, skipping trailing indexes.
    pub fn name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Error returned when parsing a malformed property path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed property path '{0}'")]
pub struct ParsePathError(pub String);

impl FromStr for PropertyPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePathError(s.to_string()))
    }
}

impl From<&str> for PropertyPath {
    /// Treats the whole string as one field name, without parsing.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
