//! A user's view of one match, as returned by the match list endpoint.

use crate::catalog::{Category, MetadataCatalog};
use crate::error::{CatalogError, MappingError};
use crate::ids::{AccessId, MatchId};
use crate::matches::detail::MatchDetail;
use crate::matches::player::Player;
use crate::record::{ExtraFields, FieldRules, RawRecord, timestamp_field};
use crate::transport::Transport;
use chrono::NaiveDateTime;
use std::sync::Arc;

pub const INFO_RULES: FieldRules = FieldRules::new(
    &["playerCount"],
    &["matchId", "startTime", "endTime", "player", "accountNo"],
    &[("matchType", "matchTypeId"), ("character", "characterId")],
);

#[derive(Clone, Debug)]
pub struct MatchInfo {
    pub match_id: MatchId,
    pub account_no: Option<AccessId>,
    pub team_id: Option<String>,
    pub channel_name: Option<String>,
    pub character_id: Option<String>,
    pub match_type_id: Option<String>,
    pub track_id: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub player_count: i64,
    /// The requesting user's own row.
    pub player: Option<Player>,
    pub extra: ExtraFields,
    transport: Option<Arc<dyn Transport>>,
}

impl MatchInfo {
    pub fn from_record(
        record: &RawRecord,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self, MappingError> {
        let mut mapped = INFO_RULES.apply(record)?;
        let player = record
            .record("player")?
            .map(|player| Player::from_record(&player))
            .transpose()?;

        Ok(Self {
            match_id: record.require_text("matchId").map(MatchId)?,
            account_no: record
                .text("accountNo")
                .filter(|value| !value.trim().is_empty())
                .map(|value| AccessId(value.into_owned())),
            team_id: mapped.take_text("teamId"),
            channel_name: mapped.take_text("channelName"),
            character_id: mapped.take_text("characterId"),
            match_type_id: mapped.take_text("matchTypeId"),
            track_id: mapped.take_text("trackId"),
            start_time: timestamp_field(record, "startTime")?,
            end_time: timestamp_field(record, "endTime")?,
            player_count: mapped.take_int("playerCount").unwrap_or_default(),
            player,
            extra: mapped.into_extra(),
            transport,
        })
    }

    /// Unresolved detail for this match, sharing this entity's transport.
    pub fn detail(&self) -> MatchDetail {
        MatchDetail::new(self.match_id.clone(), self.transport.clone())
    }

    pub fn character(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::Character, self.character_id.as_deref())
    }

    pub fn track(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::Track, self.track_id.as_deref())
    }

    pub fn match_type(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::GameType, self.match_type_id.as_deref())
    }
}
