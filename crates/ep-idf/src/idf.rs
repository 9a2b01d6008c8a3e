//! IDF document parsing, object field access, and serialization.

use crate::error::{IdfError, IdfResult};
use crate::idd::{ClassDef, Dictionary, FieldKind};
use crate::value::FieldValue;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single simulation object: a class definition plus one value per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfObject {
    def: Arc<ClassDef>,
    values: Vec<FieldValue>,
}

impl IdfObject {
    pub fn class_name(&self) -> &str {
        &self.def.name
    }

    /// Ordered field names defined for this object's class.
    pub fn field_names(&self) -> Vec<&str> {
        self.def.field_names()
    }

    /// Value of a named field. Defined-but-unset slots read as `Empty`;
    /// `None` means the class has no such field.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let index = self.def.position(name)?;
        Some(self.values.get(index).cloned().unwrap_or(FieldValue::Empty))
    }

    /// Set a named field, growing the slot vector if needed.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> IdfResult<()> {
        let index = self.def.position(name).ok_or_else(|| IdfError::UnknownField {
            class: self.def.name.clone(),
            field: name.to_string(),
        })?;
        if self.values.len() <= index {
            self.values.resize(index + 1, FieldValue::Empty);
        }
        self.values[index] = value;
        Ok(())
    }

    /// Every defined slot in order, paired with its value.
    pub fn fields(&self) -> Vec<(&str, FieldValue)> {
        self.def
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let value = self.values.get(index).cloned().unwrap_or(FieldValue::Empty);
                (field.name.as_str(), value)
            })
            .collect()
    }
}

/// An open IDF document: the object graph plus the dictionary it was parsed
/// against and, when opened from disk, its backing path.
#[derive(Debug)]
pub struct Document {
    dictionary: Arc<Dictionary>,
    objects: Vec<IdfObject>,
    path: Option<PathBuf>,
}

impl Document {
    pub fn open(path: &Path, dictionary: Arc<Dictionary>) -> IdfResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IdfError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut document = Self::parse(&content, dictionary)?;
        document.path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            objects = document.objects.len(),
            "opened document"
        );
        Ok(document)
    }

    pub fn parse(content: &str, dictionary: Arc<Dictionary>) -> IdfResult<Self> {
        let stripped = strip_comments(content);
        let mut objects = Vec::new();
        for chunk in stripped.split(';') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            objects.push(parse_object(chunk, &dictionary)?);
        }
        Ok(Self {
            dictionary,
            objects,
            path: None,
        })
    }

    pub fn objects(&self) -> &[IdfObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [IdfObject] {
        &mut self.objects
    }

    /// All objects of one class, in document order (case-insensitive).
    pub fn objects_of_class(&self, class: &str) -> Vec<&IdfObject> {
        self.objects
            .iter()
            .filter(|o| o.class_name().eq_ignore_ascii_case(class))
            .collect()
    }

    pub fn objects_of_class_mut(&mut self, class: &str) -> Vec<&mut IdfObject> {
        self.objects
            .iter_mut()
            .filter(|o| o.class_name().eq_ignore_ascii_case(class))
            .collect()
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Render back to IDF text, one value per line with `!- Field Name`
    /// annotations. Output round-trips through [`Document::parse`].
    pub fn to_idf_string(&self) -> String {
        let mut out = String::new();
        for object in &self.objects {
            if object.values.is_empty() {
                let _ = writeln!(out, "{};\n", object.class_name());
                continue;
            }
            let _ = writeln!(out, "{},", object.class_name());
            let last = object.values.len() - 1;
            for (index, value) in object.values.iter().enumerate() {
                let terminator = if index == last { ';' } else { ',' };
                let _ = writeln!(
                    out,
                    "    {value}{terminator}  !- {}",
                    object.def.fields[index].name
                );
            }
            out.push('\n');
        }
        out
    }

    /// Write to the path the document was opened from.
    pub fn save(&self) -> IdfResult<()> {
        match &self.path {
            Some(path) => self.save_as(path),
            None => Err(IdfError::NoBackingFile),
        }
    }

    pub fn save_as(&self, path: &Path) -> IdfResult<()> {
        std::fs::write(path, self.to_idf_string()).map_err(|e| IdfError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// `!` starts a comment that runs to end of line.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| match line.find('!') {
            Some(i) => &line[..i],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_object(chunk: &str, dictionary: &Dictionary) -> IdfResult<IdfObject> {
    let mut tokens = chunk.split(',').map(str::trim);
    let class_name = tokens.next().unwrap_or("");
    let def = dictionary
        .class(class_name)
        .ok_or_else(|| IdfError::UnknownClass {
            name: class_name.to_string(),
        })?;
    let mut values = Vec::new();
    for (index, token) in tokens.enumerate() {
        let Some(field) = def.fields.get(index) else {
            return Err(IdfError::TooManyValues {
                class: def.name.clone(),
                defined: def.fields.len(),
                found: index + 1,
            });
        };
        values.push(parse_value(token, field.kind));
    }
    Ok(IdfObject {
        def: Arc::clone(def),
        values,
    })
}

fn parse_value(raw: &str, kind: FieldKind) -> FieldValue {
    if raw.is_empty() {
        return FieldValue::Empty;
    }
    if kind == FieldKind::Numeric {
        if let Ok(v) = raw.parse::<f64>() {
            return FieldValue::Real(v);
        }
    }
    FieldValue::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINI_IDD: &str = r"
Building,
  A1 , \field Name
  N1 , \field North Axis
  A2 , \field Terrain
  N2 , \field Loads Convergence Tolerance Value
  N3 ; \field Temperature Convergence Tolerance Value

Material,
  A1 , \field Name
  A2 , \field Roughness
  N1 , \field Thickness
  N2 , \field Conductivity
  N3 ; \field Density
";

    const MODEL: &str = r"
BUILDING,
    Simple One Zone,  !- Name
    0.0,              !- North Axis
    Suburbs,          !- Terrain
    0.04,             !- Loads Convergence Tolerance Value
    0.4;              !- Temperature Convergence Tolerance Value

! Two materials sharing a class.
MATERIAL,
    C5 - 4 IN HW CONCRETE,
    MediumRough,
    0.1014984,
    1.729577,
    2242.585;

MATERIAL,
    GypsumBoard,
    Smooth,
    0.0127;
";

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(Dictionary::parse(MINI_IDD).unwrap())
    }

    #[test]
    fn parses_objects_in_document_order() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        let classes: Vec<&str> = document.objects().iter().map(|o| o.class_name()).collect();
        assert_eq!(classes, vec!["Building", "Material", "Material"]);
    }

    #[test]
    fn comments_are_stripped() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        let building = &document.objects()[0];
        assert_eq!(
            building.field("Name"),
            Some(FieldValue::Text("Simple One Zone".to_string()))
        );
        assert_eq!(building.field("North_Axis"), Some(FieldValue::Real(0.0)));
    }

    #[test]
    fn numeric_slots_parse_as_real_alpha_slots_stay_text() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        let concrete = &document.objects()[1];
        assert_eq!(concrete.field("Thickness"), Some(FieldValue::Real(0.1014984)));
        assert_eq!(
            concrete.field("Roughness"),
            Some(FieldValue::Text("MediumRough".to_string()))
        );
    }

    #[test]
    fn short_objects_read_empty_for_unset_slots() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        let gypsum = &document.objects()[2];
        assert_eq!(gypsum.field("Conductivity"), Some(FieldValue::Empty));
        assert_eq!(gypsum.field("Density"), Some(FieldValue::Empty));
    }

    #[test]
    fn unknown_field_reads_none_and_fails_writes() {
        let mut document = Document::parse(MODEL, dictionary()).unwrap();
        let building = &mut document.objects_mut()[0];
        assert_eq!(building.field("Azimuth"), None);
        let err = building.set_field("Azimuth", FieldValue::Real(1.0)).unwrap_err();
        assert!(matches!(err, IdfError::UnknownField { .. }));
    }

    #[test]
    fn set_field_grows_the_slot_vector() {
        let mut document = Document::parse(MODEL, dictionary()).unwrap();
        let gypsum = &mut document.objects_mut()[2];
        gypsum.set_field("Density", FieldValue::Real(800.0)).unwrap();
        assert_eq!(gypsum.field("Density"), Some(FieldValue::Real(800.0)));
        // The slot in between stays empty.
        assert_eq!(gypsum.field("Conductivity"), Some(FieldValue::Empty));
    }

    #[test]
    fn objects_of_class_is_case_insensitive() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        assert_eq!(document.objects_of_class("material").len(), 2);
        assert_eq!(document.objects_of_class("Material").len(), 2);
        assert_eq!(document.objects_of_class("ZONE").len(), 0);
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = Document::parse("ZONE, North;", dictionary()).unwrap_err();
        assert!(matches!(err, IdfError::UnknownClass { name } if name == "ZONE"));
    }

    #[test]
    fn too_many_values_is_an_error() {
        let input = "MATERIAL, a, b, 1, 2, 3, 4;";
        let err = Document::parse(input, dictionary()).unwrap_err();
        assert!(matches!(
            err,
            IdfError::TooManyValues {
                defined: 5,
                found: 6,
                ..
            }
        ));
    }

    #[test]
    fn serialized_text_round_trips() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        let text = document.to_idf_string();
        let reparsed = Document::parse(&text, Arc::clone(document.dictionary())).unwrap();
        assert_eq!(reparsed.objects(), document.objects());
    }

    #[test]
    fn save_without_backing_file_is_an_error() {
        let document = Document::parse(MODEL, dictionary()).unwrap();
        assert!(matches!(document.save(), Err(IdfError::NoBackingFile)));
    }
}
