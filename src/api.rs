//! Entry point tying the transport, the metadata catalog, and the entity
//! mappers together.

use crate::catalog::MetadataCatalog;
use crate::error::{ApiError, TransportError};
use crate::ids::{AccessId, MatchId};
use crate::matches::{AllMatches, MatchDetail, MatchResponse};
use crate::query::MatchQuery;
use crate::transport::Transport;
use crate::user::User;
use log::debug;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Api {
    transport: Arc<dyn Transport>,
    catalog: Option<Arc<MetadataCatalog>>,
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            catalog: None,
        }
    }

    /// Attach a metadata catalog for match-type names and aliases.
    pub fn with_catalog(mut self, catalog: MetadataCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub fn catalog(&self) -> Option<&MetadataCatalog> {
        self.catalog.as_deref()
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Look up a user by nickname, access id, or both.
    ///
    /// With both, the access id's nickname must equal `nickname`; an unknown
    /// access id counts as a mismatch.
    pub fn user(
        &self,
        nickname: Option<&str>,
        access_id: Option<&AccessId>,
    ) -> Result<User, ApiError> {
        match (nickname, access_id) {
            (None, None) => Err(ApiError::MissingIdentifier),
            (Some(nickname), Some(access_id)) => {
                let actual = match self.nickname_of(access_id) {
                    Ok(actual) => Some(actual),
                    Err(ApiError::Transport(TransportError::NotFound)) => None,
                    Err(err) => return Err(err),
                };
                if actual.as_deref() != Some(nickname) {
                    return Err(ApiError::IdentityMismatch {
                        nickname: nickname.to_string(),
                        access_id: access_id.0.clone(),
                    });
                }
                Ok(User::new(nickname.to_string(), access_id.clone(), self.clone()))
            }
            (None, Some(access_id)) => {
                let nickname = self.nickname_of(access_id)?;
                Ok(User::new(nickname, access_id.clone(), self.clone()))
            }
            (Some(nickname), None) => {
                let access_id = self.access_id_of(nickname)?;
                Ok(User::new(nickname.to_string(), access_id, self.clone()))
            }
        }
    }

    /// Matches of one user grouped by match type.
    pub fn user_matches(
        &self,
        access_id: &AccessId,
        query: &MatchQuery,
    ) -> Result<MatchResponse, ApiError> {
        let params = query.resolve(self.catalog())?;
        debug!("fetching match list for {access_id}");
        let record = self.transport.fetch_match_list(access_id, &params)?;
        Ok(MatchResponse::from_record(
            &record,
            Some(Arc::clone(&self.transport)),
            self.catalog(),
        )?)
    }

    /// Recent matches of all users, grouped by match type, unresolved.
    pub fn all_matches(&self, query: &MatchQuery) -> Result<AllMatches, ApiError> {
        let params = query.resolve(self.catalog())?;
        let record = self.transport.fetch_all_matches(&params)?;
        Ok(AllMatches::from_record(
            &record,
            Some(Arc::clone(&self.transport)),
            self.catalog(),
        )?)
    }

    /// Unresolved detail; the fetch happens on first attribute access.
    pub fn match_detail(&self, match_id: MatchId) -> MatchDetail {
        MatchDetail::new(match_id, Some(Arc::clone(&self.transport)))
    }

    fn nickname_of(&self, access_id: &AccessId) -> Result<String, ApiError> {
        let record = self.transport.fetch_user_by_access_id(access_id)?;
        Ok(record.require_text("name")?)
    }

    fn access_id_of(&self, nickname: &str) -> Result<AccessId, ApiError> {
        let record = self.transport.fetch_user_by_nickname(nickname)?;
        Ok(AccessId(record.require_text("accessId")?))
    }
}
