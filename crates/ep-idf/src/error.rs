use std::path::PathBuf;
use thiserror::Error;

pub type IdfResult<T> = Result<T, IdfError>;

#[derive(Error, Debug)]
pub enum IdfError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Unknown object class: {name}")]
    UnknownClass { name: String },

    #[error("Unknown field {field} on class {class}")]
    UnknownField { class: String, field: String },

    #[error("Too many values for class {class}: {found} given, {defined} defined")]
    TooManyValues {
        class: String,
        defined: usize,
        found: usize,
    },

    #[error("Data dictionary already registered from {registered}, refusing {requested}")]
    DictionaryConflict {
        registered: PathBuf,
        requested: PathBuf,
    },

    #[error("Document was not opened from a file; use save_as")]
    NoBackingFile,
}
