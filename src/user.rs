use crate::api::Api;
use crate::error::ApiError;
use crate::ids::AccessId;
use crate::matches::MatchResponse;
use crate::query::MatchQuery;

#[derive(Clone, Debug)]
/// A player account with both identifiers resolved.
///
/// Obtained from [`Api::user`], which guarantees the nickname and access id
/// belong together.
pub struct User {
    nickname: String,
    access_id: AccessId,
    api: Api,
}

impl User {
    pub(crate) fn new(nickname: String, access_id: AccessId, api: Api) -> Self {
        Self {
            nickname,
            access_id,
            api,
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn access_id(&self) -> &AccessId {
        &self.access_id
    }

    /// This user's matches; see [`Api::user_matches`].
    pub fn matches(&self, query: &MatchQuery) -> Result<MatchResponse, ApiError> {
        self.api.user_matches(&self.access_id, query)
    }
}
