//! Match entities built from raw API records.
//!
//! `MatchInfo` rows come from a user's match list, `MatchDetail` wraps the
//! deferred `matches/{id}` payload, and `MatchResponse` / `AllMatches` group
//! either kind by match type.

pub mod detail;
pub mod info;
pub mod player;
pub mod response;

pub use detail::{DetailFields, DetailState, DetailValue, MatchDetail};
pub use info::MatchInfo;
pub use player::{Player, Team, derive_rank, derive_win};
pub use response::{AllMatches, MatchResponse};
