use crate::error::TransportError;
use crate::ids::{AccessId, MatchId};
use crate::query::QueryParams;
use crate::record::RawRecord;
use crate::transport::{Transport, status_error};
use log::debug;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.nexon.co.kr/kart/v1.0/";

#[derive(Clone, Debug)]
/// Blocking HTTP client for the KartRider open API.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(api_key: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, TransportError> {
        let base_url =
            Url::parse(base_url).map_err(|err| TransportError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base url.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url, query: &[(&str, String)]) -> Result<RawRecord, TransportError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.api_key)
            .query(query)
            .send()?;
        if let Some(err) = status_error(response.status().as_u16()) {
            return Err(err);
        }
        let body: Value = response.json()?;
        RawRecord::from_value(body).map_err(|_| TransportError::Decode)
    }
}

impl Transport for HttpTransport {
    fn fetch_match_detail(&self, match_id: &MatchId) -> Result<RawRecord, TransportError> {
        self.get(self.endpoint(&["matches", &match_id.0])?, &[])
    }

    fn fetch_match_list(
        &self,
        access_id: &AccessId,
        params: &QueryParams,
    ) -> Result<RawRecord, TransportError> {
        let url = self.endpoint(&["users", &access_id.0, "matches"])?;
        self.get(url, &params.pairs())
    }

    fn fetch_all_matches(&self, params: &QueryParams) -> Result<RawRecord, TransportError> {
        self.get(self.endpoint(&["matches", "all"])?, &params.pairs())
    }

    fn fetch_user_by_nickname(&self, nickname: &str) -> Result<RawRecord, TransportError> {
        self.get(self.endpoint(&["users", "nickname", nickname])?, &[])
    }

    fn fetch_user_by_access_id(&self, access_id: &AccessId) -> Result<RawRecord, TransportError> {
        self.get(self.endpoint(&["users", &access_id.0])?, &[])
    }
}
