//! Opening models and batch field access.

use crate::error::{EditorError, EditorResult};
use ep_idf::{Document, FieldValue, IdfError, IdfObject, WeatherHeader, registry};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything needed to open a model for editing.
///
/// `dictionary_path` may be omitted once a dictionary has been registered for
/// the process; the first open must supply it. `output_dir` is recorded for
/// tooling that runs the model; nothing in the editor itself reads it.
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    pub idf_path: PathBuf,
    pub dictionary_path: Option<PathBuf>,
    pub weather_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// One named field on one object, as returned by [`ModelEditor::list_fields`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEntry {
    pub name: String,
    pub value: FieldValue,
}

/// Facade over an open document and its companion files.
#[derive(Debug)]
pub struct ModelEditor {
    document: Document,
    weather: Option<WeatherHeader>,
    output_dir: Option<PathBuf>,
}

impl ModelEditor {
    /// Open a model.
    ///
    /// Registers the dictionary for the process (or reuses the registered
    /// one), parses the document, and reads the weather header when given.
    /// Any missing or malformed file fails the open with the file layer's
    /// error, unchanged.
    pub fn open(request: OpenRequest) -> EditorResult<Self> {
        let dictionary = match &request.dictionary_path {
            Some(path) => registry::register(path)?,
            None => registry::registered().ok_or(EditorError::DictionaryNotSet)?,
        };
        let document = Document::open(&request.idf_path, dictionary)?;
        let weather = match &request.weather_path {
            Some(path) => Some(ep_idf::read_weather_header(path)?),
            None => None,
        };
        Ok(Self {
            document,
            weather,
            output_dir: request.output_dir,
        })
    }

    /// Every object in the document, in document order.
    pub fn list_objects(&self) -> &[IdfObject] {
        self.document.objects()
    }

    /// All fields of every object of `class`, flattened in object order then
    /// slot order. An unknown or absent class yields an empty list.
    pub fn list_fields(&self, class: &str) -> Vec<FieldEntry> {
        self.document
            .objects_of_class(class)
            .into_iter()
            .flat_map(|object| {
                object.fields().into_iter().map(|(name, value)| FieldEntry {
                    name: name.to_string(),
                    value,
                })
            })
            .collect()
    }

    /// Value of `field` on every object of the paired `class`.
    ///
    /// `classes` and `fields` are zipped pairwise and must be the same
    /// length. Results are flattened in pair order then object order; a
    /// class with no objects contributes nothing, while a matching object
    /// that lacks the named field is an error.
    pub fn get_field_values(
        &self,
        classes: &[&str],
        fields: &[&str],
    ) -> EditorResult<Vec<FieldValue>> {
        ensure_same_length("object classes", classes.len(), "field names", fields.len())?;
        let mut values = Vec::new();
        for (class, field) in classes.iter().copied().zip(fields.iter().copied()) {
            for object in self.document.objects_of_class(class) {
                let value = object.field(field).ok_or_else(|| IdfError::UnknownField {
                    class: object.class_name().to_string(),
                    field: field.to_string(),
                })?;
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Set `field` to `value` on every object of the paired `class`.
    ///
    /// Writes fan out: when several objects share a class, all of them get
    /// the value. A class with no objects is skipped. The document only
    /// changes in memory; persisting it is the caller's move, through
    /// [`ModelEditor::document`].
    pub fn set_field_values(
        &mut self,
        classes: &[&str],
        fields: &[&str],
        values: Vec<FieldValue>,
    ) -> EditorResult<()> {
        ensure_same_length("object classes", classes.len(), "field names", fields.len())?;
        ensure_same_length("field names", fields.len(), "values", values.len())?;
        for ((class, field), value) in classes
            .iter()
            .copied()
            .zip(fields.iter().copied())
            .zip(values)
        {
            let mut touched = 0usize;
            for object in self.document.objects_of_class_mut(class) {
                object.set_field(field, value.clone())?;
                touched += 1;
            }
            tracing::debug!(class, field, touched, "applied field value");
        }
        Ok(())
    }

    pub fn weather(&self) -> Option<&WeatherHeader> {
        self.weather.as_ref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

fn ensure_same_length(
    left_name: &'static str,
    left: usize,
    right_name: &'static str,
    right: usize,
) -> EditorResult<()> {
    if left == right {
        Ok(())
    } else {
        Err(EditorError::LengthMismatch {
            left_name,
            left,
            right_name,
            right,
        })
    }
}
