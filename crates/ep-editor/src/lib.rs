//! ep-editor: facade for opening and editing simulation input files.
//!
//! One `ModelEditor` wraps an open document plus its companion files and
//! exposes batch field access over it. All format knowledge lives in
//! `ep-idf`; this crate wires the pieces together for callers.

pub mod editor;
pub mod error;

pub use editor::{FieldEntry, ModelEditor, OpenRequest};
pub use error::{EditorError, EditorResult};
