//! Per-player rows of a match and their team grouping.
//!
//! Rank, win, and retirement are derived from the raw `matchRank` /
//! `matchWin` strings rather than mapped generically: a rank of `99` (or no
//! rank at all) marks a player who did not finish.

use crate::catalog::{Category, MetadataCatalog};
use crate::error::{CatalogError, MappingError};
use crate::ids::AccessId;
use crate::record::mapper::parse_int;
use crate::record::raw::element_record;
use crate::record::{ExtraFields, FieldRules, RawRecord};
use serde::Serialize;

pub const PLAYER_RULES: FieldRules = FieldRules::new(
    &["matchTime"],
    &["matchRank", "matchWin", "matchRetired", "accountNo", "characterName"],
    &[
        ("kart", "kartId"),
        ("pet", "petId"),
        ("flyingPet", "flyingPetId"),
        ("character", "characterId"),
    ],
);

pub const TEAM_RULES: FieldRules = FieldRules::new(&[], &["players", "teamId"], &[]);

const RETIRED_RANK: &str = "99";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub account_no: Option<AccessId>,
    pub character_name: Option<String>,
    pub character_id: Option<String>,
    pub kart_id: Option<String>,
    pub pet_id: Option<String>,
    pub flying_pet_id: Option<String>,
    /// Lap time in milliseconds; `0` when the player retired.
    pub match_time: i64,
    /// Finishing position, `-1` for retired players.
    pub match_rank: i64,
    pub match_retired: bool,
    /// False only for a literal `matchWin` of `"0"`; a missing value counts as a win.
    pub match_win: bool,
    pub extra: ExtraFields,
}

impl Player {
    pub fn from_record(record: &RawRecord) -> Result<Self, MappingError> {
        let mut mapped = PLAYER_RULES.apply(record)?;
        let rank = record.text("matchRank").unwrap_or_default();
        let (match_rank, match_retired) = derive_rank(&rank)?;
        let match_win = derive_win(&record.text("matchWin").unwrap_or_default());

        Ok(Self {
            account_no: non_blank(record, "accountNo").map(AccessId),
            character_name: non_blank(record, "characterName"),
            character_id: mapped.take_text("characterId"),
            kart_id: mapped.take_text("kartId"),
            pet_id: mapped.take_text("petId"),
            flying_pet_id: mapped.take_text("flyingPetId"),
            match_time: mapped.take_int("matchTime").unwrap_or_default(),
            match_rank,
            match_retired,
            match_win,
            extra: mapped.into_extra(),
        })
    }

    pub fn character(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::Character, self.character_id.as_deref())
    }

    pub fn kart(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::Kart, self.kart_id.as_deref())
    }

    pub fn pet(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::Pet, self.pet_id.as_deref())
    }

    pub fn flying_pet(&self, catalog: &MetadataCatalog) -> Result<String, CatalogError> {
        catalog.name_of(&Category::FlyingPet, self.flying_pet_id.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One side of a team match.
pub struct Team {
    pub team_id: Option<String>,
    pub players: Vec<Player>,
    pub extra: ExtraFields,
}

impl Team {
    pub fn from_record(record: &RawRecord) -> Result<Self, MappingError> {
        let mapped = TEAM_RULES.apply(record)?;
        Ok(Self {
            team_id: non_blank(record, "teamId"),
            players: players_from(record, "players")?.unwrap_or_default(),
            extra: mapped.into_extra(),
        })
    }
}

/// Build players from an array field, `None` when the field is absent.
pub(crate) fn players_from(
    record: &RawRecord,
    field: &str,
) -> Result<Option<Vec<Player>>, MappingError> {
    let Some(items) = record.array(field)? else {
        return Ok(None);
    };
    items
        .iter()
        .map(|item| Player::from_record(&element_record(field, item)?))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// `(rank, retired)` from the raw `matchRank` string.
pub fn derive_rank(raw: &str) -> Result<(i64, bool), MappingError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == RETIRED_RANK {
        return Ok((-1, true));
    }
    Ok((parse_int("matchRank", raw)?, false))
}

/// Only a literal `"0"` is a loss.
pub fn derive_win(raw: &str) -> bool {
    raw.trim() != "0"
}

fn non_blank(record: &RawRecord, field: &str) -> Option<String> {
    record
        .text(field)
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.into_owned())
}
