//! ep-idf: the IDF/IDD file layer for epkit.
//!
//! Contains:
//! - value (dynamic field values)
//! - idd (data dictionary: object classes and their field definitions)
//! - idf (document parsing, object field access, serialization)
//! - registry (process-wide data dictionary registration)
//! - epw (weather file header)
//! - error (shared error types)

pub mod epw;
pub mod error;
pub mod idd;
pub mod idf;
pub mod registry;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use epw::{WeatherHeader, read_weather_header};
pub use error::{IdfError, IdfResult};
pub use idd::{ClassDef, Dictionary, FieldDef, FieldKind};
pub use idf::{Document, IdfObject};
pub use value::FieldValue;
