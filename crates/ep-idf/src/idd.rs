//! Data dictionary (IDD) parsing.
//!
//! Reads just enough of the dictionary grammar to know, for every object
//! class, the ordered field names and whether each slot is alphanumeric or
//! numeric. Memos, units, defaults, and the rest of the annotation set are
//! skipped; field-level validation stays with the engine that owns the
//! dictionary.

use crate::error::{IdfError, IdfResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Field slot kind, from the dictionary token (`A#` or `N#`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Alpha,
    Numeric,
}

/// A single field definition within a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name with spaces normalized to underscores (e.g. `North_Axis`).
    /// Slots the dictionary leaves unnamed keep their token (`A1`, `N3`).
    pub name: String,
    pub kind: FieldKind,
}

/// One object class: its name as written in the dictionary plus its ordered
/// field definitions.
#[derive(Debug, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl ClassDef {
    /// Resolve a field name to its slot index (ASCII-case-insensitive).
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Parsed data dictionary, keyed by upper-cased class name.
#[derive(Debug, Default, PartialEq)]
pub struct Dictionary {
    classes: HashMap<String, Arc<ClassDef>>,
}

impl Dictionary {
    pub fn load(path: &Path) -> IdfResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IdfError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dictionary = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            classes = dictionary.classes.len(),
            "loaded data dictionary"
        );
        Ok(dictionary)
    }

    pub fn parse(content: &str) -> IdfResult<Self> {
        let mut classes = HashMap::new();
        let mut current: Option<ClassDef> = None;

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            // Annotations run from the first backslash to end of line.
            let (code, annotation) = match line.find('\\') {
                Some(i) => (line[..i].trim(), Some(line[i + 1..].trim())),
                None => (line, None),
            };

            let mut terminated = false;
            for token in code.split(',') {
                let mut token = token.trim();
                if let Some(stripped) = token.strip_suffix(';') {
                    token = stripped.trim_end();
                    terminated = true;
                }
                if token.is_empty() {
                    continue;
                }
                match slot_kind(token) {
                    Some(kind) => match current.as_mut() {
                        Some(class) => class.fields.push(FieldDef {
                            name: token.to_string(),
                            kind,
                        }),
                        None => {
                            return Err(IdfError::Parse {
                                message: format!("field slot {token:?} outside any class"),
                            });
                        }
                    },
                    None => {
                        if let Some(class) = &current {
                            return Err(IdfError::Parse {
                                message: format!(
                                    "unexpected token {token:?} inside class {}",
                                    class.name
                                ),
                            });
                        }
                        current = Some(ClassDef {
                            name: token.to_string(),
                            fields: Vec::new(),
                        });
                    }
                }
            }

            // `\field Human Name` names the slot it follows.
            if let (Some(annotation), Some(class)) = (annotation, current.as_mut()) {
                if let Some(rest) = annotation.strip_prefix("field ") {
                    if let Some(field) = class.fields.last_mut() {
                        field.name = rest.trim().replace(' ', "_");
                    }
                }
            }

            if terminated {
                if let Some(class) = current.take() {
                    classes.insert(class.name.to_ascii_uppercase(), Arc::new(class));
                }
            }
        }

        if let Some(class) = current {
            return Err(IdfError::Parse {
                message: format!("unterminated class definition: {}", class.name),
            });
        }
        Ok(Self { classes })
    }

    /// Look up a class by name, case-insensitively.
    pub fn class(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.classes.get(&name.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// `A1`, `N12`, ... are field slots; anything else starts a class.
fn slot_kind(token: &str) -> Option<FieldKind> {
    let mut chars = token.chars();
    let kind = match chars.next() {
        Some('A') => FieldKind::Alpha,
        Some('N') => FieldKind::Numeric,
        _ => return None,
    };
    let rest = chars.as_str();
    if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
        Some(kind)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINI_IDD: &str = r"
!IDD_Version 25.1.0
\group Simulation Parameters

Building,
      \memo Describes parameters that are used during the simulation
  A1 , \field Name
      \default NONE
  N1 , \field North Axis
      \units deg
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

    #[test]
    fn parses_classes_and_field_names() {
        let dictionary = Dictionary::parse(MINI_IDD).unwrap();
        assert_eq!(dictionary.len(), 2);

        let building = dictionary.class("BUILDING").unwrap();
        assert_eq!(building.name, "Building");
        assert_eq!(
            building.field_names(),
            vec![
                "Name",
                "North_Axis",
                "Terrain",
                "Loads_Convergence_Tolerance_Value",
                "Temperature_Convergence_Tolerance_Value",
            ]
        );
        assert_eq!(building.fields[0].kind, FieldKind::Alpha);
        assert_eq!(building.fields[1].kind, FieldKind::Numeric);
    }

    #[test]
    fn class_lookup_is_case_insensitive() {
        let dictionary = Dictionary::parse(MINI_IDD).unwrap();
        assert!(dictionary.class("material").is_some());
        assert!(dictionary.class("Material").is_some());
        assert!(dictionary.class("ZONE").is_none());
    }

    #[test]
    fn field_position_is_case_insensitive() {
        let dictionary = Dictionary::parse(MINI_IDD).unwrap();
        let material = dictionary.class("MATERIAL").unwrap();
        assert_eq!(material.position("thickness"), Some(2));
        assert_eq!(material.position("Thickness"), Some(2));
        assert_eq!(material.position("Porosity"), None);
    }

    #[test]
    fn unnamed_slots_keep_their_token() {
        let dictionary = Dictionary::parse("Version,\n  A1 ;\n").unwrap();
        let version = dictionary.class("VERSION").unwrap();
        assert_eq!(version.field_names(), vec!["A1"]);
    }

    #[test]
    fn unterminated_class_is_an_error() {
        let err = Dictionary::parse("Building,\n  A1 , \\field Name\n").unwrap_err();
        assert!(matches!(err, IdfError::Parse { .. }));
    }

    #[test]
    fn slot_outside_class_is_an_error() {
        let err = Dictionary::parse("  A1 ; \\field Name\n").unwrap_err();
        assert!(matches!(err, IdfError::Parse { .. }));
    }
}
