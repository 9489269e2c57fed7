//! Entry identifiers
//!
//! Inputs inside an entry are named `<prefix>-<index>-<field>`. The string is
//! parsed once when a field set is built from markup; afterwards identifiers
//! are always rendered from the entry index, never parsed back.

use std::fmt;

use crate::FieldSetError;

/// Structured form of an input identifier such as `authors-2-name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub prefix: String,
    pub index: usize,
    pub field: String,
}

impl FieldId {
    pub fn new(prefix: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            index,
            field: field.into(),
        }
    }

    /// Parse an identifier. The last all-digit segment that has text on both
    /// sides is the entry index, so nested lists (`editions-0-authors-3-name`)
    /// resolve to the innermost entry.
    pub fn parse(raw: &str) -> Result<Self, FieldSetError> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() >= 3 {
            for i in (1..parts.len() - 1).rev() {
                let segment = parts[i];
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    continue;
                }
                let prefix = parts[..i].join("-");
                let field = parts[i + 1..].join("-");
                if prefix.is_empty() || field.is_empty() {
                    break;
                }
                let index = segment
                    .parse::<usize>()
                    .map_err(|_| FieldSetError::MalformedIdentifier(raw.to_string()))?;
                return Ok(Self { prefix, index, field });
            }
        }
        Err(FieldSetError::MalformedIdentifier(raw.to_string()))
    }

    /// Same field in another entry.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.index, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let id = FieldId::parse("items-3-name").unwrap();
        assert_eq!(id, FieldId::new("items", 3, "name"));
        assert_eq!(id.to_string(), "items-3-name");
    }

    #[test]
    fn test_parse_nested_uses_innermost_index() {
        let id = FieldId::parse("editions-0-authors-12-name").unwrap();
        assert_eq!(id.prefix, "editions-0-authors");
        assert_eq!(id.index, 12);
        assert_eq!(id.field, "name");
    }

    #[test]
    fn test_parse_field_with_dashes() {
        let id = FieldId::parse("links-1-link-description").unwrap();
        assert_eq!(id.prefix, "links");
        assert_eq!(id.index, 1);
        assert_eq!(id.field, "link-description");
    }

    #[test]
    fn test_parse_rejects_missing_segment() {
        for raw in ["name", "items-name", "items-x-name", "items-3", "-3-name", "3-name-x"] {
            assert_eq!(
                FieldId::parse(raw),
                Err(FieldSetError::MalformedIdentifier(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_with_index() {
        let id = FieldId::new("items", 0, "name").with_index(7);
        assert_eq!(id.to_string(), "items-7-name");
    }
}
