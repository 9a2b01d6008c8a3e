//! Process-wide data dictionary registration.
//!
//! Documents are parsed against exactly one dictionary per process.
//! Registration is explicit and idempotent: the first call loads and installs
//! the dictionary, a repeat call with the same path hands back the installed
//! one, and a call with a different path is rejected rather than silently
//! overwriting. Callers that need two dictionaries need two processes.

use crate::error::{IdfError, IdfResult};
use crate::idd::Dictionary;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

struct Registered {
    path: PathBuf,
    dictionary: Arc<Dictionary>,
}

static REGISTERED: Mutex<Option<Registered>> = Mutex::new(None);

/// Register the data dictionary for this process, loading it on first call.
pub fn register(path: &Path) -> IdfResult<Arc<Dictionary>> {
    let canonical = std::fs::canonicalize(path).map_err(|e| IdfError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut guard = REGISTERED.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(entry) if entry.path == canonical => Ok(Arc::clone(&entry.dictionary)),
        Some(entry) => Err(IdfError::DictionaryConflict {
            registered: entry.path.clone(),
            requested: canonical,
        }),
        None => {
            let dictionary = Arc::new(Dictionary::load(&canonical)?);
            tracing::info!(path = %canonical.display(), "registered process data dictionary");
            *guard = Some(Registered {
                path: canonical,
                dictionary: Arc::clone(&dictionary),
            });
            Ok(dictionary)
        }
    }
}

/// The currently registered dictionary, if any.
pub fn registered() -> Option<Arc<Dictionary>> {
    REGISTERED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|entry| Arc::clone(&entry.dictionary))
}
