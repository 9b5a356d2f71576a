//! Deserializable representation of one category dataset.
//!
//! Each `<store>/<category>.json` file is a JSON array of `{id, name}` pairs.
//! The bundle occasionally ships entries with an empty name; those are kept
//! as-is and turned into the `Unknown` sentinel at lookup time.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// Single `{id, name}` record of a category dataset.
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Read and parse a category dataset from disk.
pub fn load_entries_from_path(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
