//! Client configuration.
//!
//! Settings come from explicit builder calls or from the environment. The
//! environment is read through a lookup function so callers (and tests) can
//! supply their own source instead of the process environment.

use crate::api::Api;
use crate::catalog::MetadataCatalog;
use crate::transport::{DEFAULT_BASE_URL, HttpTransport};
use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub const API_KEY_ENV: &str = "KART_API_KEY";
pub const API_URL_ENV: &str = "KART_API_URL";
pub const METADATA_PATH_ENV: &str = "KART_METADATA_PATH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Root of the offline metadata bundle; names stay unresolved without it.
    pub metadata_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            metadata_path: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_metadata_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_path = Some(path.into());
        self
    }

    /// Read `KART_API_KEY`, `KART_API_URL`, and `KART_METADATA_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let Some(api_key) = read(API_KEY_ENV) else {
            bail!("{API_KEY_ENV} is not set; an api key is required to query the KartRider API");
        };
        let mut config = Self::new(api_key);
        if let Some(base_url) = read(API_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Some(path) = read(METADATA_PATH_ENV) {
            config = config.with_metadata_path(path);
        }
        Ok(config)
    }

    /// Open the metadata catalog, if one is configured.
    pub fn catalog(&self) -> Result<Option<MetadataCatalog>> {
        self.metadata_path
            .as_ref()
            .map(|path| {
                MetadataCatalog::open(path)
                    .with_context(|| format!("opening metadata store {}", path.display()))
            })
            .transpose()
    }

    /// Wire an [`Api`] over HTTP with the configured catalog.
    pub fn build_api(&self) -> Result<Api> {
        let transport = HttpTransport::with_base_url(self.api_key.clone(), &self.base_url)
            .with_context(|| format!("creating HTTP transport for {}", self.base_url))?;
        let api = Api::new(Arc::new(transport));
        Ok(match self.catalog()? {
            Some(catalog) => api.with_catalog(catalog),
            None => api,
        })
    }
}
