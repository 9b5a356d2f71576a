//! Location of the offline metadata bundle.
//!
//! The store only validates that its root is a directory; individual
//! category files are checked lazily by the catalog on every query.

use crate::catalog::identity::Category;
use crate::error::CatalogError;
use std::fs;
use std::path::{Path, PathBuf};

const DATASET_EXTENSION: &str = "json";
const IMAGE_EXTENSION: &str = "png";

#[derive(Clone, Debug, Eq, PartialEq)]
/// Validated root directory of a metadata bundle.
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    /// Validate `path` and canonicalize it.
    ///
    /// Fails with [`CatalogError::StoreNotFound`] when the path is missing or
    /// not a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(CatalogError::StoreNotFound(path.to_path_buf()));
        }
        let root = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<store>/<category>.json`
    pub fn dataset_path(&self, category: &Category) -> PathBuf {
        self.root
            .join(format!("{}.{DATASET_EXTENSION}", category.as_str()))
    }

    /// `<store>/<category>/`
    pub fn image_dir(&self, category: &Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    /// `<store>/<category>/<id>.png`; the file itself is not checked.
    pub fn image_path(&self, category: &Category, id: &str) -> PathBuf {
        self.image_dir(category)
            .join(format!("{id}.{IMAGE_EXTENSION}"))
    }
}
