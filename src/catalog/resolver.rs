//! Id/name resolution against the offline metadata bundle.
//!
//! Datasets are re-read on every query; the bundle is small and may be
//! replaced on disk while a client is running. Lookups that find no matching
//! entry resolve to [`UNKNOWN`]; lookups against a category whose dataset is
//! absent fail with [`CatalogError::CategoryNotFound`].

use crate::catalog::identity::{Category, is_identifier};
use crate::catalog::model::{CatalogEntry, load_entries_from_path};
use crate::catalog::store::MetadataStore;
use crate::error::CatalogError;
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sentinel returned when an id or name has no usable match in a dataset.
pub const UNKNOWN: &str = "Unknown";

#[derive(Clone, Debug)]
/// Resolver over one configured [`MetadataStore`].
pub struct MetadataCatalog {
    store: MetadataStore,
}

impl MetadataCatalog {
    pub fn new(store: MetadataStore) -> Self {
        Self { store }
    }

    /// Open a catalog rooted at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        MetadataStore::open(path).map(Self::new)
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Point the catalog at another store.
    ///
    /// The new path is validated first; on failure the current store stays
    /// in place.
    pub fn set_store(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        self.store = MetadataStore::open(path)?;
        Ok(())
    }

    /// True when `<store>/<category>.json` is present.
    pub fn exists(&self, category: &Category) -> bool {
        self.store.dataset_path(category).is_file()
    }

    /// Resolve an asset id to its display name.
    ///
    /// When several entries share the id, the last one wins.
    pub fn name_of(&self, category: &Category, id: Option<&str>) -> Result<String, CatalogError> {
        let entries = self.load(category)?;
        let Some(id) = id else {
            return Ok(UNKNOWN.to_string());
        };
        Ok(last_match(&entries, |entry| entry.id == id, |entry| &entry.name))
    }

    /// Resolve a display name to its asset id.
    ///
    /// When several entries share the name, the last one wins.
    pub fn id_of(&self, category: &Category, name: &str) -> Result<String, CatalogError> {
        let entries = self.load(category)?;
        Ok(last_match(&entries, |entry| entry.name == name, |entry| &entry.id))
    }

    /// Load a whole dataset as an id → name map.
    pub fn all_of(&self, category: &Category) -> Result<BTreeMap<String, String>, CatalogError> {
        Ok(self
            .load(category)?
            .into_iter()
            .map(|entry| (entry.id, entry.name))
            .collect())
    }

    /// Conventional image path for an asset given by name or id.
    ///
    /// Requires the category's image directory; the image file itself is not
    /// checked. Names that cannot be resolved yield `<store>/<category>/Unknown.png`.
    pub fn image_path_of(
        &self,
        name_or_id: &str,
        category: &Category,
    ) -> Result<PathBuf, CatalogError> {
        if !self.store.image_dir(category).is_dir() {
            return Err(CatalogError::ImageDirNotFound {
                category: category.to_string(),
                store: self.store.root().to_path_buf(),
            });
        }
        let id = if is_identifier(name_or_id) {
            name_or_id.to_string()
        } else {
            self.id_of(category, name_or_id)?
        };
        Ok(self.store.image_path(category, &id))
    }

    pub fn karts(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::Kart)
    }

    pub fn pets(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::Pet)
    }

    pub fn tracks(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::Track)
    }

    pub fn game_types(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::GameType)
    }

    pub fn flying_pets(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::FlyingPet)
    }

    pub fn characters(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.all_of(&Category::Character)
    }

    fn load(&self, category: &Category) -> Result<Vec<CatalogEntry>, CatalogError> {
        let path = self.store.dataset_path(category);
        if !path.is_file() {
            return Err(CatalogError::CategoryNotFound {
                category: category.to_string(),
                store: self.store.root().to_path_buf(),
            });
        }
        debug!("loading metadata dataset {}", path.display());
        load_entries_from_path(&path)
    }
}

// Duplicates resolve to the last entry in dataset order.
fn last_match<'a>(
    entries: &'a [CatalogEntry],
    matches: impl Fn(&CatalogEntry) -> bool,
    select: impl Fn(&'a CatalogEntry) -> &'a String,
) -> String {
    let found = entries
        .iter()
        .rev()
        .find(|&entry| matches(entry))
        .map(select);
    match found {
        Some(value) if !value.is_empty() => value.clone(),
        _ => UNKNOWN.to_string(),
    }
}
