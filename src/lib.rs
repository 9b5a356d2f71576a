//! Typed client for the KartRider open API.
//!
//! The API answers with flat, string-typed records. This crate maps them into
//! entities (`MatchInfo`, `MatchDetail`, `Player`, `Team`), groups match lists
//! by match type, defers the expensive per-match detail fetch until an
//! attribute is actually read, and resolves opaque asset ids (karts, tracks,
//! characters, game types, ...) through the offline metadata bundle.
//!
//! `Api` is the entry point; `MetadataCatalog` can also be used on its own.

pub mod alias_map;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod matches;
pub mod query;
pub mod record;
pub mod transport;
pub mod user;

pub use alias_map::AliasKeyedMap;
pub use api::Api;
pub use catalog::{Category, MetadataCatalog, MetadataStore, UNKNOWN, is_identifier};
pub use config::ClientConfig;
pub use error::{AliasMapError, ApiError, CatalogError, MappingError, MatchError, TransportError};
pub use ids::{AccessId, MatchId};
pub use matches::{
    AllMatches, DetailFields, DetailState, DetailValue, MatchDetail, MatchInfo, MatchResponse,
    Player, Team,
};
pub use query::{MatchQuery, QueryParams};
pub use record::{FieldRules, FieldValue, RawRecord};
pub use transport::{HttpTransport, Transport};
pub use user::User;
