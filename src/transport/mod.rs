//! Contract between the mapping layer and whatever talks to the API.
//!
//! Entities only ever see [`Transport`]; [`HttpTransport`] is the production
//! implementation and tests substitute canned payloads. Every call is
//! blocking and returns the decoded JSON object as a [`RawRecord`].

pub mod http;

pub use http::{DEFAULT_BASE_URL, HttpTransport};

use crate::error::TransportError;
use crate::ids::{AccessId, MatchId};
use crate::query::QueryParams;
use crate::record::RawRecord;
use std::fmt;

pub trait Transport: Send + Sync + fmt::Debug {
    /// `matches/{matchId}`
    fn fetch_match_detail(&self, match_id: &MatchId) -> Result<RawRecord, TransportError>;

    /// `users/{accessId}/matches`
    fn fetch_match_list(
        &self,
        access_id: &AccessId,
        params: &QueryParams,
    ) -> Result<RawRecord, TransportError>;

    /// `matches/all`
    fn fetch_all_matches(&self, params: &QueryParams) -> Result<RawRecord, TransportError>;

    /// `users/nickname/{nickname}`
    fn fetch_user_by_nickname(&self, nickname: &str) -> Result<RawRecord, TransportError>;

    /// `users/{accessId}`
    fn fetch_user_by_access_id(&self, access_id: &AccessId) -> Result<RawRecord, TransportError>;
}

/// Translate a response status into the documented error, `None` for 200.
pub fn status_error(code: u16) -> Option<TransportError> {
    match code {
        200 => None,
        400 => Some(TransportError::InvalidParams),
        403 => Some(TransportError::Forbidden),
        404 => Some(TransportError::NotFound),
        429 => Some(TransportError::TooManyRequests),
        other => Some(TransportError::UnknownStatus(other)),
    }
}
