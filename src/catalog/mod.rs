//! Offline metadata catalog.
//!
//! Wraps the metadata bundle (`<store>/<category>.json` datasets plus
//! `<store>/<category>/<id>.png` images) so callers can turn opaque asset ids
//! into display names and back. `MetadataCatalog` is the entry point; the
//! identity helpers decide whether a caller-supplied string is an id or a name.

pub mod identity;
pub mod model;
pub mod resolver;
pub mod store;

pub use identity::{Category, is_identifier};
pub use model::{CatalogEntry, load_entries_from_path};
pub use resolver::{MetadataCatalog, UNKNOWN};
pub use store::MetadataStore;
