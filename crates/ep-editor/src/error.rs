//! Error types for the editor facade.

use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No data dictionary given and none registered for this process")]
    DictionaryNotSet,

    #[error("Input lengths differ: {left_name} has {left}, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("File layer error: {0}")]
    Idf(#[from] ep_idf::IdfError),
}
