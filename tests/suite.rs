// Integration suite for the client: field mapping, grouped match lists, lazy
// detail resolution, and catalog lookups against an on-disk metadata store.
mod support;

use anyhow::Result;
use kartrider::{
    AccessId, AliasKeyedMap, AliasMapError, Api, ApiError, CatalogError, Category, DetailValue,
    FieldRules, FieldValue, MatchDetail, MatchError, MatchId, MatchQuery, MetadataCatalog, UNKNOWN,
    is_identifier,
};
use kartrider::matches::{derive_rank, derive_win};
use serde_json::json;
use std::sync::Arc;
use support::{
    ACCESS_ID, CHARACTER_ID, FOX_KART_ID, FOX_KART_NAME, FakeTransport, INDI_SPEED_ID,
    INDI_SPEED_NAME, NICKNAME, TEAM_SPEED_ID, TEAM_SPEED_NAME, TRACK_ID, TRACK_NAME,
    individual_detail, metadata_store, record, team_detail,
};

#[test]
fn field_rules_rename_convert_and_keep_blanks() -> Result<()> {
    const RULES: FieldRules =
        FieldRules::new(&["playTime"], &["matchId"], &[("kart", "kartId")]);
    let mapped = RULES.apply(&record(json!({
        "matchId": "ignored",
        "kart": "abc",
        "playTime": "",
        "matchResult": " ",
        "rankinggrade2": "3"
    })))?;

    assert!(mapped.get("matchId").is_none());
    assert!(mapped.get("kart").is_none());
    assert_eq!(mapped.get("kartId").and_then(FieldValue::as_text), Some("abc"));
    assert_eq!(mapped.get("playTime").and_then(FieldValue::as_int), Some(0));
    assert!(mapped.get("matchResult").is_some_and(FieldValue::is_absent));
    assert_eq!(
        mapped.get("rankinggrade2").and_then(FieldValue::as_text),
        Some("3")
    );
    Ok(())
}

#[test]
fn alias_lookup_shares_the_canonical_group() -> Result<()> {
    let mut map = AliasKeyedMap::new();
    map.set(TEAM_SPEED_ID, vec![1, 2]);
    map.set(INDI_SPEED_ID, vec![3]);
    map.add_alias(TEAM_SPEED_ID, TEAM_SPEED_NAME)?;

    assert!(std::ptr::eq(map.get(TEAM_SPEED_ID)?, map.get(TEAM_SPEED_NAME)?));
    map.get_mut(TEAM_SPEED_NAME)?.push(4);
    assert_eq!(map.get(TEAM_SPEED_ID)?, &vec![1, 2, 4]);

    let merged: Vec<i32> = map.merge_values().into_iter().copied().collect();
    assert_eq!(merged, [1, 2, 4, 3]);
    assert_eq!(
        map.get("missing"),
        Err(AliasMapError::KeyNotFound("missing".into()))
    );
    Ok(())
}

#[test]
fn detail_fetches_once_across_attribute_reads() -> Result<()> {
    let transport = Arc::new(FakeTransport::new().with_detail("m1", individual_detail("m1")));
    let api = Api::new(transport.clone());
    let mut detail = api.match_detail(MatchId::from("m1"));

    assert_eq!(detail.field("matchId")?, DetailValue::Text("m1"));
    assert_eq!(transport.detail_calls(), 0);
    assert!(matches!(
        detail.field("noSuchAttribute"),
        Err(MatchError::AttributeNotFound(_))
    ));
    assert_eq!(transport.detail_calls(), 0);

    assert_eq!(detail.channel_name()?, "speedIndiFastest");
    assert_eq!(detail.game_speed()?, 4);
    assert_eq!(detail.track_id()?, TRACK_ID);
    assert!(!detail.is_team_game()?);
    let players = detail.players()?;
    assert_eq!(players.len(), 2);
    assert_eq!((players[1].match_rank, players[1].match_retired), (-1, true));
    assert_eq!(transport.detail_calls(), 1);

    assert!(matches!(
        detail.resolve(),
        Err(MatchError::AlreadyResolved(id)) if id == "m1"
    ));
    assert!(matches!(
        detail.field("seasonType")?,
        DetailValue::Extra(FieldValue::Text(season)) if season == "1"
    ));
    assert_eq!(transport.detail_calls(), 1);
    Ok(())
}

#[test]
fn team_detail_groups_players_by_team() -> Result<()> {
    let store = metadata_store()?;
    let catalog = MetadataCatalog::open(store.path())?;
    let transport = Arc::new(FakeTransport::new().with_detail("t1", team_detail("t1")));
    let api = Api::new(transport.clone());
    let mut detail = api.match_detail(MatchId::from("t1"));

    assert!(detail.is_team_game()?);
    let teams = detail.teams()?;
    assert_eq!(teams.len(), 2);
    assert_eq!(teams.iter().map(|team| team.players.len()).sum::<usize>(), 4);
    assert_eq!(teams[0].team_id.as_deref(), Some("1"));
    let retired = &teams[0].players[0];
    assert_eq!((retired.match_rank, retired.match_retired), (-1, true));
    assert_eq!(retired.match_time, 0);
    assert_eq!(retired.kart(&catalog)?, FOX_KART_NAME);
    assert!(!teams[1].players[0].match_win);

    assert!(matches!(
        detail.players(),
        Err(MatchError::AttributeNotFound(name)) if name == "players"
    ));
    assert_eq!(detail.match_type(&catalog)?, TEAM_SPEED_NAME);
    assert_eq!(detail.track(&catalog)?, TRACK_NAME);
    assert_eq!(transport.detail_calls(), 1);
    Ok(())
}

#[test]
fn detail_names_resolve_through_the_catalog() -> Result<()> {
    let store = metadata_store()?;
    let catalog = MetadataCatalog::open(store.path())?;
    let transport = Arc::new(FakeTransport::new().with_detail("m1", individual_detail("m1")));
    let mut detail = Api::new(transport.clone()).match_detail(MatchId::from("m1"));

    assert_eq!(detail.match_type(&catalog)?, INDI_SPEED_NAME);
    assert_eq!(detail.match_type_id()?, INDI_SPEED_ID);
    assert_eq!(detail.track(&catalog)?, TRACK_NAME);
    assert_eq!(transport.detail_calls(), 1);

    let mut unknown = MatchDetail::from_record(&record(json!({
        "matchId": "m9",
        "matchType": "retired-mode",
        "trackId": ""
    })))?;
    assert_eq!(unknown.match_type(&catalog)?, UNKNOWN);
    assert_eq!(unknown.track(&catalog)?, UNKNOWN);
    Ok(())
}

#[test]
fn failed_fetch_leaves_detail_unresolved() {
    let transport = Arc::new(FakeTransport::new());
    let mut detail = MatchDetail::new(MatchId::from("gone"), Some(transport.clone()));
    assert!(matches!(
        detail.channel_name(),
        Err(MatchError::Transport(_))
    ));
    assert!(!detail.is_resolved());
    assert!(detail.channel_name().is_err());
    assert_eq!(transport.detail_calls(), 2);
}

#[test]
fn catalog_round_trips_names_and_ids() -> Result<()> {
    let store = metadata_store()?;
    let catalog = MetadataCatalog::open(store.path())?;

    assert_eq!(catalog.name_of(&Category::Kart, Some(FOX_KART_ID))?, FOX_KART_NAME);
    assert_eq!(catalog.id_of(&Category::Kart, FOX_KART_NAME)?, FOX_KART_ID);
    assert_eq!(catalog.name_of(&Category::Kart, Some("no-such-id"))?, UNKNOWN);
    assert_eq!(catalog.name_of(&Category::Kart, Some("nameless"))?, UNKNOWN);
    assert_eq!(catalog.name_of(&Category::Kart, None)?, UNKNOWN);
    assert_eq!(catalog.id_of(&Category::Kart, "없는 카트")?, UNKNOWN);
    assert_eq!(catalog.karts()?.len(), 3);

    let image = catalog.image_path_of(FOX_KART_NAME, &Category::Kart)?;
    assert_eq!(
        image,
        catalog
            .store()
            .root()
            .join("kart")
            .join(format!("{FOX_KART_ID}.png"))
    );
    assert!(matches!(
        catalog.image_path_of(TRACK_ID, &Category::Track),
        Err(CatalogError::ImageDirNotFound { .. })
    ));

    let fox_id = catalog.id_of(&Category::Kart, FOX_KART_NAME)?;
    let fox_name = catalog.name_of(&Category::Kart, Some(fox_id.as_str()))?;
    assert_eq!(catalog.id_of(&Category::Kart, &fox_name)?, fox_id);

    let missing = Category::from_name("missing-category");
    assert!(matches!(
        catalog.id_of(&missing, "x"),
        Err(CatalogError::CategoryNotFound { category, .. }) if category == "missing-category"
    ));

    assert!(!catalog.exists(&missing));
    assert!(matches!(
        catalog.name_of(&missing, Some("x")),
        Err(CatalogError::CategoryNotFound { .. })
    ));
    Ok(())
}

#[test]
fn identifier_heuristic_and_result_derivation() -> Result<()> {
    assert!(is_identifier(FOX_KART_ID));
    assert!(!is_identifier(FOX_KART_NAME));
    assert!(!is_identifier("short-id"));
    assert!(!is_identifier(&format!("{FOX_KART_ID} x")));

    assert_eq!(derive_rank("99")?, (-1, true));
    assert_eq!(derive_rank("2")?, (2, false));
    assert!(!derive_win("0"));
    assert!(derive_win("1"));
    Ok(())
}

#[test]
fn user_lookup_requires_a_consistent_identity() -> Result<()> {
    let transport = Arc::new(FakeTransport::new().with_user(ACCESS_ID, NICKNAME));
    let api = Api::new(transport.clone());
    let access_id = AccessId::from(ACCESS_ID);

    assert!(matches!(api.user(None, None), Err(ApiError::MissingIdentifier)));
    assert_eq!(transport.user_calls(), 0);

    let user = api.user(Some(NICKNAME), None)?;
    assert_eq!(user.access_id(), &access_id);
    let user = api.user(None, Some(&access_id))?;
    assert_eq!(user.nickname(), NICKNAME);
    api.user(Some(NICKNAME), Some(&access_id))?;

    assert!(matches!(
        api.user(Some("someone-else"), Some(&access_id)),
        Err(ApiError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        api.user(Some(NICKNAME), Some(&AccessId::from("0"))),
        Err(ApiError::IdentityMismatch { .. })
    ));
    Ok(())
}

#[test]
fn user_matches_are_grouped_and_aliased() -> Result<()> {
    let store = metadata_store()?;
    let transport = Arc::new(
        FakeTransport::new()
            .with_user(ACCESS_ID, NICKNAME)
            .with_detail("team-1", individual_detail("team-1"))
            .with_match_list(json!({
                "nickName": NICKNAME,
                "matches": [{
                    "matchType": TEAM_SPEED_ID,
                    "matches": [
                        {
                            "accountNo": ACCESS_ID,
                            "matchId": "team-1",
                            "matchType": TEAM_SPEED_ID,
                            "teamId": "1",
                            "character": CHARACTER_ID,
                            "startTime": "2019-12-16T13:18:44",
                            "endTime": "2019-12-16T13:20:45",
                            "channelName": "speedTeamFast",
                            "trackId": TRACK_ID,
                            "playerCount": "8",
                            "player": {
                                "kart": FOX_KART_ID,
                                "matchRank": "2",
                                "matchWin": "1",
                                "matchTime": "109000"
                            }
                        },
                        {"matchId": "team-2", "matchType": TEAM_SPEED_ID, "playerCount": ""}
                    ]
                }]
            })),
    );
    let api = Api::new(transport.clone()).with_catalog(MetadataCatalog::open(store.path())?);
    let user = api.user(Some(NICKNAME), None)?;

    let response = user.matches(&MatchQuery::new().match_type(TEAM_SPEED_NAME).limit(900))?;
    let params = transport.last_params().expect("list endpoint was called");
    assert_eq!(params.match_types, TEAM_SPEED_ID);
    assert_eq!(params.limit, 500);

    assert_eq!(response.nickname.as_deref(), Some(NICKNAME));
    assert_eq!(response.len(), 1);
    let by_name = response.get(TEAM_SPEED_NAME).expect("alias resolves");
    assert!(std::ptr::eq(by_name, response.get(TEAM_SPEED_ID).expect("id resolves")));
    assert_eq!(response.all().len(), 2);

    let info = &by_name[0];
    assert_eq!(info.player_count, 8);
    assert_eq!(by_name[1].player_count, 0);
    let catalog = api.catalog().expect("catalog attached");
    assert_eq!(info.match_type(catalog)?, TEAM_SPEED_NAME);
    let player = info.player.as_ref().expect("embedded player");
    assert_eq!(player.kart(catalog)?, FOX_KART_NAME);

    let mut detail = info.detail();
    assert_eq!(transport.detail_calls(), 0);
    assert_eq!(detail.play_time()?, 121);
    assert_eq!(transport.detail_calls(), 1);
    Ok(())
}

#[test]
fn all_matches_defer_every_detail() -> Result<()> {
    let store = metadata_store()?;
    let transport = Arc::new(
        FakeTransport::new()
            .with_detail("m1", individual_detail("m1"))
            .with_all_matches(json!({
                "matches": [
                    {"matchType": INDI_SPEED_ID, "matches": ["m1", "m2"]},
                    {"matchType": "unlisted-type", "matches": ["m3"]}
                ]
            })),
    );
    let api = Api::new(transport.clone()).with_catalog(MetadataCatalog::open(store.path())?);

    let mut all = api.all_matches(&MatchQuery::new())?;
    assert_eq!(all.len(), 2);
    assert!(all.contains(INDI_SPEED_NAME));
    assert!(all.contains("unlisted-type"));
    assert_eq!(transport.detail_calls(), 0);

    let details = all.get_mut(INDI_SPEED_NAME).expect("alias resolves");
    assert!(details.iter().all(|detail| !detail.is_resolved()));
    assert_eq!(details[0].player_count()?, 2);
    assert!(details[0].is_resolved());
    assert!(!details[1].is_resolved());
    assert_eq!(transport.detail_calls(), 1);
    Ok(())
}

#[test]
fn match_type_names_need_a_catalog() {
    let transport = Arc::new(FakeTransport::new().with_all_matches(json!({"matches": []})));
    let api = Api::new(transport);
    assert!(matches!(
        api.all_matches(&MatchQuery::new().match_type(TEAM_SPEED_NAME)),
        Err(ApiError::CatalogRequired(name)) if name == TEAM_SPEED_NAME
    ));
    assert!(api.all_matches(&MatchQuery::new().match_type(TEAM_SPEED_ID)).is_ok());
}
