//! Error taxonomy shared by the mapper, catalog, and match entities.
//!
//! Malformed input and misuse are fatal and propagate to the caller. Catalog
//! entry misses are not errors at all: they resolve to [`UNKNOWN`] so display
//! code can render them directly. A missing category dataset, on the other
//! hand, is always an error.
//!
//! [`UNKNOWN`]: crate::catalog::UNKNOWN

use std::path::PathBuf;
use thiserror::Error;

/// Malformed values encountered while applying field rules to a raw record.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("field '{field}' is not an integer: {value:?}")]
    InvalidInteger { field: String, value: String },

    #[error("field '{field}' is not a recognised timestamp: {value:?}")]
    InvalidTimestamp { field: String, value: String },

    #[error("field '{field}' has unexpected shape (expected {expected})")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    #[error("required field '{0}' is missing")]
    MissingField(String),
}

/// Failures raised by the offline metadata catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The configured store path is not an existing directory.
    #[error("metadata store not found: {}", .0.display())]
    StoreNotFound(PathBuf),

    /// The category dataset `<store>/<category>.json` is absent.
    #[error("metadata category '{category}' not found under {}", .store.display())]
    CategoryNotFound { category: String, store: PathBuf },

    #[error("image directory for '{category}' not found under {}", .store.display())]
    ImageDirNotFound { category: String, store: PathBuf },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AliasMapError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Transport failures, split by the status codes the API documents.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid api key or request parameters (400)")]
    InvalidParams,

    #[error("api key is not allowed to access this resource (403)")]
    Forbidden,

    #[error("resource not found (404)")]
    NotFound,

    #[error("api key request quota exceeded (429)")]
    TooManyRequests,

    #[error("unrecognised response status {0}")]
    UnknownStatus(u16),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("response body is not a JSON object")]
    Decode,
}

/// Errors surfaced by match entities and their lazy detail resolution.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Resolution was triggered on a detail that is already resolved.
    #[error("match {0} is already resolved")]
    AlreadyResolved(String),

    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    #[error("match {0} has no transport to fetch its detail")]
    NoTransport(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    AliasMap(#[from] AliasMapError),
}

/// Errors from the [`Api`](crate::Api) facade.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("either a nickname or an access id is required")]
    MissingIdentifier,

    #[error("nickname '{nickname}' does not belong to access id {access_id}")]
    IdentityMismatch { nickname: String, access_id: String },

    #[error("match type '{0}' is a display name but no metadata catalog is configured")]
    CatalogRequired(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
