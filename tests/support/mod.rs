#![allow(dead_code)]

use anyhow::Result;
use kartrider::{AccessId, MatchId, QueryParams, RawRecord, Transport, TransportError};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const FOX_KART_ID: &str = "1f438b9f6939d01b396acb96648c72a57f781b0dc8871bb84b3e2ff8da7ec0f2";
pub const FOX_KART_NAME: &str = "폭스 9 XE";
pub const TEAM_SPEED_ID: &str = "effd66758144a29868663aa50e85d3d95c5bc0147d7fdb9802691c2087f3416e";
pub const TEAM_SPEED_NAME: &str = "스피드 팀전";
pub const INDI_SPEED_ID: &str = "7b9f0fd5377c38514dbb78ebe63ac6c3b81009d5a31dd569d1cff8f005aa881a";
pub const INDI_SPEED_NAME: &str = "스피드 개인전";
pub const TRACK_ID: &str = "2b2f0cc9a1b4d7d3f1d6a2b9f7f3b4f4b1c1d8c0d8b2d56f8f4e02fc3a0b07d2";
pub const TRACK_NAME: &str = "빌리지 고가의 질주";
pub const CHARACTER_ID: &str = "42c729e64e31aea803e4881432f7b95129ce97535c29e4f9a72919a9f267b418";

pub const ACCESS_ID: &str = "1560546859";
pub const NICKNAME: &str = "한글닉네임";

/// Metadata store laid out like the offline bundle, rooted in a temp dir.
pub fn metadata_store() -> Result<TempDir> {
    let dir = TempDir::new()?;
    write_dataset(
        dir.path(),
        "kart",
        json!([
            {"id": "a0b1c2", "name": "코튼 X"},
            {"id": FOX_KART_ID, "name": FOX_KART_NAME},
            {"id": "nameless", "name": ""}
        ]),
    )?;
    write_dataset(
        dir.path(),
        "gameType",
        json!([
            {"id": TEAM_SPEED_ID, "name": TEAM_SPEED_NAME},
            {"id": INDI_SPEED_ID, "name": INDI_SPEED_NAME}
        ]),
    )?;
    write_dataset(
        dir.path(),
        "track",
        json!([{"id": TRACK_ID, "name": TRACK_NAME}]),
    )?;
    write_dataset(
        dir.path(),
        "character",
        json!([{"id": CHARACTER_ID, "name": "배찌"}]),
    )?;
    write_dataset(dir.path(), "pet", json!([{"id": "pet-1", "name": "핑크빈"}]))?;
    write_dataset(
        dir.path(),
        "flyingPet",
        json!([{"id": "fly-1", "name": "파츠"}]),
    )?;
    fs::create_dir(dir.path().join("kart"))?;
    fs::write(dir.path().join("kart").join(format!("{FOX_KART_ID}.png")), b"")?;
    Ok(dir)
}

fn write_dataset(root: &Path, category: &str, entries: Value) -> Result<()> {
    fs::write(
        root.join(format!("{category}.json")),
        serde_json::to_vec(&entries)?,
    )?;
    Ok(())
}

pub fn record(value: Value) -> RawRecord {
    RawRecord::from_value(value).expect("fixture payload is an object")
}

/// Detail payload of an individual speed match.
pub fn individual_detail(match_id: &str) -> Value {
    json!({
        "matchId": match_id,
        "channelName": "speedIndiFastest",
        "startTime": "2019-12-16T13:18:43.879",
        "endTime": "2019-12-16T13:20:45",
        "gameSpeed": "4",
        "matchResult": "",
        "matchType": INDI_SPEED_ID,
        "playTime": "121",
        "playerCount": "2",
        "trackId": TRACK_ID,
        "seasonType": "1",
        "players": [
            {
                "accountNo": ACCESS_ID,
                "characterName": NICKNAME,
                "character": CHARACTER_ID,
                "kart": FOX_KART_ID,
                "matchRank": "1",
                "matchWin": "1",
                "matchTime": "105000"
            },
            {
                "accountNo": "2222",
                "characterName": "other",
                "kart": "a0b1c2",
                "matchRank": "99",
                "matchWin": "0",
                "matchTime": ""
            }
        ]
    })
}

/// Detail payload of a team speed match: two teams of two.
pub fn team_detail(match_id: &str) -> Value {
    json!({
        "matchId": match_id,
        "channelName": "speedTeamFast",
        "startTime": "2019-12-16T13:18:44",
        "endTime": "2019-12-16T13:20:45",
        "gameSpeed": "4",
        "matchResult": "1",
        "matchType": TEAM_SPEED_ID,
        "playTime": "130",
        "playerCount": "4",
        "trackId": TRACK_ID,
        "teams": [
            {
                "teamId": "1",
                "players": [
                    {"accountNo": ACCESS_ID, "characterName": NICKNAME, "kart": FOX_KART_ID,
                     "matchRank": "99", "matchWin": "1", "matchRetired": "1", "matchTime": ""},
                    {"accountNo": "3333", "characterName": "mate", "kart": "a0b1c2",
                     "matchRank": "1", "matchWin": "1", "matchTime": "104500"}
                ]
            },
            {
                "teamId": "2",
                "players": [
                    {"accountNo": "4444", "characterName": "rival", "matchRank": "2",
                     "matchWin": "0", "matchTime": "105100"},
                    {"accountNo": "5555", "characterName": "rival2", "matchRank": "3",
                     "matchWin": "0", "matchTime": "106000"}
                ]
            }
        ]
    })
}

/// Canned API that counts every call it serves.
#[derive(Debug, Default)]
pub struct FakeTransport {
    details: BTreeMap<String, Value>,
    users: Vec<(String, String)>,
    match_list: Option<Value>,
    all_matches: Option<Value>,
    detail_calls: AtomicUsize,
    user_calls: AtomicUsize,
    last_params: Mutex<Option<QueryParams>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail(mut self, match_id: &str, payload: Value) -> Self {
        self.details.insert(match_id.to_string(), payload);
        self
    }

    pub fn with_user(mut self, access_id: &str, nickname: &str) -> Self {
        self.users.push((access_id.to_string(), nickname.to_string()));
        self
    }

    pub fn with_match_list(mut self, payload: Value) -> Self {
        self.match_list = Some(payload);
        self
    }

    pub fn with_all_matches(mut self, payload: Value) -> Self {
        self.all_matches = Some(payload);
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<QueryParams> {
        self.last_params.lock().expect("params lock").clone()
    }

    fn remember(&self, params: &QueryParams) {
        *self.last_params.lock().expect("params lock") = Some(params.clone());
    }
}

impl Transport for FakeTransport {
    fn fetch_match_detail(&self, match_id: &MatchId) -> Result<RawRecord, TransportError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&match_id.0)
            .map(|payload| record(payload.clone()))
            .ok_or(TransportError::NotFound)
    }

    fn fetch_match_list(
        &self,
        _access_id: &AccessId,
        params: &QueryParams,
    ) -> Result<RawRecord, TransportError> {
        self.remember(params);
        self.match_list
            .clone()
            .map(record)
            .ok_or(TransportError::NotFound)
    }

    fn fetch_all_matches(&self, params: &QueryParams) -> Result<RawRecord, TransportError> {
        self.remember(params);
        self.all_matches
            .clone()
            .map(record)
            .ok_or(TransportError::NotFound)
    }

    fn fetch_user_by_nickname(&self, nickname: &str) -> Result<RawRecord, TransportError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .iter()
            .find(|(_, name)| name == nickname)
            .map(|(id, name)| record(json!({"accessId": id, "name": name, "level": 0})))
            .ok_or(TransportError::NotFound)
    }

    fn fetch_user_by_access_id(&self, access_id: &AccessId) -> Result<RawRecord, TransportError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .iter()
            .find(|(id, _)| *id == access_id.0)
            .map(|(id, name)| record(json!({"accessId": id, "name": name, "level": 0})))
            .ok_or(TransportError::NotFound)
    }
}
