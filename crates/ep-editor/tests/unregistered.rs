//! This binary must stay a single test: it relies on no dictionary ever
//! being registered in its process.

use ep_editor::{EditorError, ModelEditor, OpenRequest};

#[test]
fn opening_without_a_dictionary_anywhere_is_an_error() {
    let idf_path = std::env::temp_dir().join("ep_editor_unregistered.idf");
    std::fs::write(&idf_path, "BUILDING, X;").unwrap();

    let err = ModelEditor::open(OpenRequest {
        idf_path,
        dictionary_path: None,
        weather_path: None,
        output_dir: None,
    })
    .unwrap_err();

    assert!(matches!(err, EditorError::DictionaryNotSet));
}
