//! Match detail with deferred resolution.
//!
//! Only the match id is known when a detail is created (match lists carry
//! nothing else). Every other attribute lives behind one `matches/{id}`
//! fetch that happens the first time any of them is read, or when
//! [`MatchDetail::resolve`] is called explicitly. The fetch result is kept for
//! the lifetime of the value; a resolved detail is never fetched again.

use crate::catalog::{Category, MetadataCatalog};
use crate::error::{MappingError, MatchError};
use crate::ids::MatchId;
use crate::matches::player::{Player, Team, players_from};
use crate::record::raw::element_record;
use crate::record::{ExtraFields, FieldRules, FieldValue, RawRecord, timestamp_field};
use crate::transport::Transport;
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;
use std::sync::Arc;

pub const DETAIL_RULES: FieldRules = FieldRules::new(
    &["gameSpeed", "playTime", "playerCount"],
    &["matchId", "startTime", "endTime", "teams", "players"],
    &[("matchType", "matchTypeId")],
);

/// Attribute names only available after resolution.
pub const DEFERRED_FIELDS: &[&str] = &[
    "channelName",
    "startTime",
    "endTime",
    "gameSpeed",
    "matchResult",
    "matchType",
    "matchTypeId",
    "playTime",
    "playerCount",
    "trackId",
    "teams",
    "players",
    "isTeamGame",
];

pub fn is_deferred_field(name: &str) -> bool {
    DEFERRED_FIELDS
        .iter()
        .any(|field| field.eq_ignore_ascii_case(name))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Attributes populated by the detail fetch.
pub struct DetailFields {
    pub channel_name: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub game_speed: Option<i64>,
    pub match_result: Option<String>,
    pub match_type_id: Option<String>,
    pub play_time: Option<i64>,
    pub player_count: Option<i64>,
    pub track_id: Option<String>,
    pub teams: Option<Vec<Team>>,
    pub players: Option<Vec<Player>>,
    pub is_team_game: bool,
    pub extra: ExtraFields,
}

impl DetailFields {
    pub fn from_record(record: &RawRecord) -> Result<Self, MappingError> {
        let mut mapped = DETAIL_RULES.apply(record)?;
        let teams = match record.array("teams")? {
            Some(items) => Some(
                items
                    .iter()
                    .map(|item| Team::from_record(&element_record("teams", item)?))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(Self {
            channel_name: mapped.take_text("channelName"),
            start_time: timestamp_field(record, "startTime")?,
            end_time: timestamp_field(record, "endTime")?,
            game_speed: mapped.take_int("gameSpeed"),
            match_result: mapped.take_text("matchResult"),
            match_type_id: mapped.take_text("matchTypeId"),
            play_time: mapped.take_int("playTime"),
            player_count: mapped.take_int("playerCount"),
            track_id: mapped.take_text("trackId"),
            is_team_game: teams.is_some(),
            teams,
            players: players_from(record, "players")?,
            extra: mapped.into_extra(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Resolution state; `Resolved` is terminal.
pub enum DetailState {
    Unresolved,
    Resolved(Box<DetailFields>),
}

/// Borrowed view of one attribute, as returned by [`MatchDetail::field`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetailValue<'a> {
    Text(&'a str),
    Int(i64),
    Bool(bool),
    Time(NaiveDateTime),
    Teams(&'a [Team]),
    Players(&'a [Player]),
    Extra(&'a FieldValue),
}

#[derive(Clone, Debug)]
pub struct MatchDetail {
    match_id: MatchId,
    transport: Option<Arc<dyn Transport>>,
    state: DetailState,
}

impl MatchDetail {
    /// Unresolved detail; nothing is fetched until an attribute is read.
    pub fn new(match_id: MatchId, transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            match_id,
            transport,
            state: DetailState::Unresolved,
        }
    }

    /// Already-resolved detail built from a payload the caller fetched.
    pub fn from_record(record: &RawRecord) -> Result<Self, MappingError> {
        let match_id = record.require_text("matchId").map(MatchId)?;
        let fields = DetailFields::from_record(record)?;
        Ok(Self {
            match_id,
            transport: None,
            state: DetailState::Resolved(Box::new(fields)),
        })
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, DetailState::Resolved(_))
    }

    /// Resolved attributes without triggering a fetch.
    pub fn resolved(&self) -> Option<&DetailFields> {
        match &self.state {
            DetailState::Resolved(fields) => Some(fields),
            DetailState::Unresolved => None,
        }
    }

    /// Fetch and apply the detail payload.
    ///
    /// Fails with [`MatchError::AlreadyResolved`] on a resolved detail. A
    /// failed fetch leaves the detail unresolved.
    pub fn resolve(&mut self) -> Result<&DetailFields, MatchError> {
        if self.is_resolved() {
            return Err(MatchError::AlreadyResolved(self.match_id.0.clone()));
        }
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| MatchError::NoTransport(self.match_id.0.clone()))?;
        debug!("fetching detail for match {}", self.match_id);
        let record = transport.fetch_match_detail(&self.match_id)?;
        let fields = DetailFields::from_record(&record)?;
        self.state = DetailState::Resolved(Box::new(fields));
        match self.state {
            DetailState::Resolved(ref fields) => Ok(fields),
            DetailState::Unresolved => unreachable!("state was assigned above"),
        }
    }

    /// Resolved attributes, fetching them on first use.
    pub fn fields(&mut self) -> Result<&DetailFields, MatchError> {
        match self.state {
            DetailState::Resolved(ref fields) => Ok(fields),
            DetailState::Unresolved => self.resolve(),
        }
    }

    pub fn channel_name(&mut self) -> Result<&str, MatchError> {
        found(self.fields()?.channel_name.as_deref(), "channelName")
    }

    pub fn start_time(&mut self) -> Result<NaiveDateTime, MatchError> {
        found(self.fields()?.start_time, "startTime")
    }

    pub fn end_time(&mut self) -> Result<NaiveDateTime, MatchError> {
        found(self.fields()?.end_time, "endTime")
    }

    pub fn game_speed(&mut self) -> Result<i64, MatchError> {
        found(self.fields()?.game_speed, "gameSpeed")
    }

    pub fn match_result(&mut self) -> Result<&str, MatchError> {
        found(self.fields()?.match_result.as_deref(), "matchResult")
    }

    pub fn match_type_id(&mut self) -> Result<&str, MatchError> {
        found(self.fields()?.match_type_id.as_deref(), "matchTypeId")
    }

    pub fn play_time(&mut self) -> Result<i64, MatchError> {
        found(self.fields()?.play_time, "playTime")
    }

    pub fn player_count(&mut self) -> Result<i64, MatchError> {
        found(self.fields()?.player_count, "playerCount")
    }

    pub fn track_id(&mut self) -> Result<&str, MatchError> {
        found(self.fields()?.track_id.as_deref(), "trackId")
    }

    /// Teams of a team match; individual matches have none.
    pub fn teams(&mut self) -> Result<&[Team], MatchError> {
        found(self.fields()?.teams.as_deref(), "teams")
    }

    /// Players of an individual match.
    pub fn players(&mut self) -> Result<&[Player], MatchError> {
        found(self.fields()?.players.as_deref(), "players")
    }

    pub fn is_team_game(&mut self) -> Result<bool, MatchError> {
        Ok(self.fields()?.is_team_game)
    }

    /// Game-type display name, `Unknown` when the catalog has no entry.
    pub fn match_type(&mut self, catalog: &MetadataCatalog) -> Result<String, MatchError> {
        let id = self.fields()?.match_type_id.as_deref();
        Ok(catalog.name_of(&Category::GameType, id)?)
    }

    pub fn track(&mut self, catalog: &MetadataCatalog) -> Result<String, MatchError> {
        let id = self.fields()?.track_id.as_deref();
        Ok(catalog.name_of(&Category::Track, id)?)
    }

    /// Attribute lookup by upstream field name.
    ///
    /// `matchId` is always available. Deferred names resolve the detail on
    /// first use. Unmapped payload fields are reachable once resolved; any
    /// other name is [`MatchError::AttributeNotFound`] and never fetches.
    pub fn field(&mut self, name: &str) -> Result<DetailValue<'_>, MatchError> {
        if name.eq_ignore_ascii_case("matchId") {
            return Ok(DetailValue::Text(&self.match_id.0));
        }
        let fields = if is_deferred_field(name) {
            self.fields()?
        } else {
            self.resolved()
                .ok_or_else(|| MatchError::AttributeNotFound(name.to_string()))?
        };
        let value = match name.to_ascii_lowercase().as_str() {
            "channelname" => fields.channel_name.as_deref().map(DetailValue::Text),
            "starttime" => fields.start_time.map(DetailValue::Time),
            "endtime" => fields.end_time.map(DetailValue::Time),
            "gamespeed" => fields.game_speed.map(DetailValue::Int),
            "matchresult" => fields.match_result.as_deref().map(DetailValue::Text),
            "matchtype" | "matchtypeid" => fields.match_type_id.as_deref().map(DetailValue::Text),
            "playtime" => fields.play_time.map(DetailValue::Int),
            "playercount" => fields.player_count.map(DetailValue::Int),
            "trackid" => fields.track_id.as_deref().map(DetailValue::Text),
            "teams" => fields.teams.as_deref().map(DetailValue::Teams),
            "players" => fields.players.as_deref().map(DetailValue::Players),
            "isteamgame" => Some(DetailValue::Bool(fields.is_team_game)),
            _ => fields
                .extra
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| DetailValue::Extra(value)),
        };
        value.ok_or_else(|| MatchError::AttributeNotFound(name.to_string()))
    }
}

fn found<T>(value: Option<T>, name: &str) -> Result<T, MatchError> {
    value.ok_or_else(|| MatchError::AttributeNotFound(name.to_string()))
}
