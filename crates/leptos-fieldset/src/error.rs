//! Field-set errors

use thiserror::Error;

/// Reasons a field set cannot be built or mutated.
///
/// Every variant is detected before the DOM is touched, so callers can report
/// the problem and leave the server-rendered markup as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSetError {
    #[error("identifier `{0}` has no numeric entry segment (expected `<prefix>-<index>-<field>`)")]
    MalformedIdentifier(String),

    #[error("add control target `{0}` does not resolve to an element")]
    MissingTarget(String),

    #[error("field set `{0}` has no entries to use as a template")]
    NoEntries(String),

    #[error("entry {0} is not part of the field set")]
    UnknownEntry(usize),

    #[error("identifier `{found}` does not belong to field set `{expected}`")]
    ForeignIdentifier { expected: String, found: String },

    #[error("identifier `{id}` does not match the entry index {expected}")]
    InconsistentEntry { id: String, expected: usize },

    #[error("entry {index} follows entry {previous}; indices must increase")]
    UnorderedEntry { index: usize, previous: usize },

    #[error("no index is left after entry {0}")]
    IndexOverflow(usize),
}
