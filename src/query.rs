//! Match list query parameters.
//!
//! Callers describe a query with dates and match types given either as
//! game-type ids or display names; [`MatchQuery::resolve`] turns that into the
//! flat string parameters the list endpoints take.

use crate::catalog::{Category, MetadataCatalog, UNKNOWN, is_identifier};
use crate::error::ApiError;
use crate::record::format_query_date;
use chrono::NaiveDateTime;
use log::warn;

/// Largest page the list endpoints accept.
pub const MAX_LIMIT: u32 = 500;
const DEFAULT_LIMIT: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchQuery {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub offset: u32,
    pub limit: u32,
    /// Game types as ids or display names.
    pub match_types: Vec<String>,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
            match_types: Vec::new(),
        }
    }
}

impl MatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Page size, clamped to [`MAX_LIMIT`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn match_type(mut self, name_or_id: impl Into<String>) -> Self {
        self.match_types.push(name_or_id.into());
        self
    }

    pub fn match_types<I, S>(mut self, names_or_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.match_types
            .extend(names_or_ids.into_iter().map(Into::into));
        self
    }

    /// Resolve display names to game-type ids and render the parameters.
    ///
    /// Ids pass through untouched; names need a catalog.
    pub fn resolve(&self, catalog: Option<&MetadataCatalog>) -> Result<QueryParams, ApiError> {
        let match_types = self.match_type_ids(catalog)?;
        Ok(QueryParams {
            start_date: self
                .start_date
                .as_ref()
                .map(format_query_date)
                .unwrap_or_default(),
            end_date: self
                .end_date
                .as_ref()
                .map(format_query_date)
                .unwrap_or_default(),
            offset: self.offset,
            limit: self.limit.min(MAX_LIMIT),
            match_types,
        })
    }

    /// Match types as a comma-separated id list; display names need a catalog.
    pub fn match_type_ids(&self, catalog: Option<&MetadataCatalog>) -> Result<String, ApiError> {
        let mut ids = Vec::with_capacity(self.match_types.len());
        for match_type in &self.match_types {
            if is_identifier(match_type) {
                ids.push(match_type.clone());
                continue;
            }
            let catalog = catalog.ok_or_else(|| ApiError::CatalogRequired(match_type.clone()))?;
            let id = catalog.id_of(&Category::GameType, match_type)?;
            if id == UNKNOWN {
                warn!("match type '{match_type}' is not in the gameType dataset");
            }
            ids.push(id);
        }

        Ok(ids.join(","))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Rendered list-endpoint parameters; empty strings mean "unset".
pub struct QueryParams {
    pub start_date: String,
    pub end_date: String,
    pub offset: u32,
    pub limit: u32,
    pub match_types: String,
}

impl QueryParams {
    /// Query-string pairs in the order the endpoints document them.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
            ("match_types", self.match_types.clone()),
        ]
    }
}
