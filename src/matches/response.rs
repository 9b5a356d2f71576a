//! Match lists grouped by match type.
//!
//! Both list endpoints return `{"matches": [{"matchType": <id>, "matches":
//! [...]}, ...]}`. Groups are keyed by the game-type id; when the catalog has
//! a `gameType` dataset the display name is registered as an alias.

use crate::alias_map::AliasKeyedMap;
use crate::catalog::{Category, MetadataCatalog, UNKNOWN};
use crate::error::{MappingError, MatchError};
use crate::ids::MatchId;
use crate::matches::detail::MatchDetail;
use crate::matches::info::MatchInfo;
use crate::record::RawRecord;
use crate::record::raw::{element_record, scalar_text};
use crate::transport::Transport;
use log::warn;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
/// One user's matches.
pub struct MatchResponse {
    pub nickname: Option<String>,
    pub matches: AliasKeyedMap<MatchInfo>,
}

impl MatchResponse {
    pub fn from_record(
        record: &RawRecord,
        transport: Option<Arc<dyn Transport>>,
        catalog: Option<&MetadataCatalog>,
    ) -> Result<Self, MatchError> {
        let matches = group_by_match_type(record, catalog, |item| {
            MatchInfo::from_record(&element_record("matches", item)?, transport.clone())
        })?;
        Ok(Self {
            nickname: record
                .text("nickName")
                .map(|nickname| nickname.into_owned()),
            matches,
        })
    }

    /// Matches of one type, by game-type id or display name.
    pub fn get(&self, match_type: &str) -> Option<&Vec<MatchInfo>> {
        self.matches.get(match_type).ok()
    }

    pub fn contains(&self, match_type: &str) -> bool {
        self.matches.contains(match_type)
    }

    /// Number of match-type groups.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Every match across all groups.
    pub fn all(&self) -> Vec<&MatchInfo> {
        self.matches.merge_values()
    }
}

#[derive(Clone, Debug)]
/// Recent matches of every user, as unresolved details.
pub struct AllMatches {
    pub matches: AliasKeyedMap<MatchDetail>,
}

impl AllMatches {
    pub fn from_record(
        record: &RawRecord,
        transport: Option<Arc<dyn Transport>>,
        catalog: Option<&MetadataCatalog>,
    ) -> Result<Self, MatchError> {
        let matches = group_by_match_type(record, catalog, |item| {
            let match_id = scalar_text(item).ok_or_else(|| MappingError::UnexpectedShape {
                field: "matches".to_string(),
                expected: "array of match ids",
            })?;
            Ok(MatchDetail::new(
                MatchId(match_id.into_owned()),
                transport.clone(),
            ))
        })?;
        Ok(Self { matches })
    }

    pub fn get(&self, match_type: &str) -> Option<&Vec<MatchDetail>> {
        self.matches.get(match_type).ok()
    }

    pub fn get_mut(&mut self, match_type: &str) -> Option<&mut Vec<MatchDetail>> {
        self.matches.get_mut(match_type).ok()
    }

    pub fn contains(&self, match_type: &str) -> bool {
        self.matches.contains(match_type)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_details(self) -> Vec<MatchDetail> {
        self.matches.into_merged()
    }
}

fn group_by_match_type<T>(
    record: &RawRecord,
    catalog: Option<&MetadataCatalog>,
    mut build: impl FnMut(&Value) -> Result<T, MappingError>,
) -> Result<AliasKeyedMap<T>, MatchError> {
    let mut grouped = AliasKeyedMap::new();
    let catalog = catalog.filter(|catalog| catalog.exists(&Category::GameType));

    for group in record.array("matches")?.unwrap_or_default() {
        let group = element_record("matches", group)?;
        let match_type = group.require_text("matchType")?;
        let items = group
            .array("matches")?
            .unwrap_or_default()
            .iter()
            .map(&mut build)
            .collect::<Result<Vec<_>, _>>()?;

        if grouped.contains(&match_type) {
            grouped.get_mut(&match_type)?.extend(items);
            continue;
        }
        grouped.set(match_type.clone(), items);

        if let Some(catalog) = catalog {
            let name = catalog.name_of(&Category::GameType, Some(match_type.as_str()))?;
            if name == UNKNOWN {
                warn!("match type {match_type} has no name in the gameType dataset");
            } else {
                grouped.add_alias(&match_type, name)?;
            }
        }
    }

    Ok(grouped)
}
