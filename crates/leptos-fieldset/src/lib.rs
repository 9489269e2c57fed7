//! Leptos FieldSet
//!
//! Repeatable groups of form fields ("entries") whose inputs are named
//! `<prefix>-<index>-<field>`. New entries are appended after the last one
//! with the next index; removing the only entry clears it instead, so a
//! field set is never empty.

mod component;
mod error;
mod ident;
mod set;

pub use component::DynamicFieldSet;
pub use error::FieldSetError;
pub use ident::FieldId;
pub use set::{
    Entry, FieldSet, FieldTemplate, FieldValue, InputKind, RawInput, RemovePolicy, Removal,
};
