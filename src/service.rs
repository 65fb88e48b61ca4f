//! Served views — each one a pure function of cache state.
//!
//! A view asks the tiered cache for its raw document(s) with a refetch bound
//! to the upstream client, decodes once, and hands the wire structs to the
//! transform modules. Upstream trouble surfaces only on cold misses; stale
//! data is preferred over no data.

use crate::cache::policy::{
    LIVE_TTL, POSTSEASON_LIVE_TTL, POSTSEASON_TTL, PROFILE_TTL, SCHEDULE_TTL,
};
use crate::cache::{CacheKey, DocumentStore, FileStore, FixedTtl, LiveAwareTtl, TieredCache};
use crate::config::Settings;
use crate::error::{ServiceError, ServiceResult};
use crate::reference::TeamDirectory;
use chrono::NaiveDate;
use log::{debug, warn};
use mlb_api::client::StatsApi;
use mlb_api::wire::{
    FeedResponse, PostseasonResponse, RosterResponse, ScheduleResponse, StandingsResponse,
    TeamsResponse,
};
use mlb_api::{
    Bracket, DivisionRow, GameDetail, RosterPlayer, ScheduleDay, TeamProfile, WildCardLeague,
    bracket, detail, schedule, standings, teams,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// MLB plus the MiLB levels the upstream serves.
pub const VALID_SPORT_IDS: [u32; 5] = [1, 11, 12, 13, 14];

/// Postseason series data exists in the upstream from this season on.
const MIN_BRACKET_SEASON: i32 = 2022;

pub struct MlbService<S: DocumentStore> {
    api: StatsApi,
    cache: TieredCache<S>,
    teams: TeamDirectory,
}

impl MlbService<FileStore> {
    pub fn from_settings(settings: &Settings) -> Self {
        let api = match &settings.api_base {
            Some(base) => StatsApi::with_base(base),
            None => StatsApi::new(),
        };
        Self::new(
            api,
            FileStore::new(&settings.cache_dir),
            TeamDirectory::load_from(&settings.team_file),
        )
    }
}

impl<S: DocumentStore> MlbService<S> {
    pub fn new(api: StatsApi, store: S, teams: TeamDirectory) -> Self {
        Self {
            api,
            cache: TieredCache::new(store),
            teams,
        }
    }

    /// Three-day schedule window around `center`, optionally filtered to one
    /// team. Unknown sport ids fall back to MLB.
    pub async fn schedule(
        &self,
        center: NaiveDate,
        sport_id: u32,
        team_filter: Option<u32>,
    ) -> ServiceResult<Vec<ScheduleDay>> {
        let sport_id = coerce_sport_id(sport_id);
        let start = center.pred_opt().unwrap_or(center);
        let end = center.succ_opt().unwrap_or(center);

        let key = CacheKey::Schedule {
            sport_id,
            start,
            end,
        };
        let doc = self
            .cache
            .fetch(&key, &LiveAwareTtl::default(), || {
                self.api.fetch_schedule(sport_id, start, end)
            })
            .await?;

        let raw: ScheduleResponse = decode(&doc.body, "schedule");
        let mut days = schedule::normalize_schedule(&raw, self.teams.identities(), center);
        if let Some(team_id) = team_filter.filter(|&id| id > 0) {
            schedule::retain_team(&mut days, team_id);
        }
        Ok(days)
    }

    /// Line score, box score, and live matchup for one game.
    pub async fn game_detail(&self, game_pk: u64) -> ServiceResult<GameDetail> {
        if game_pk == 0 {
            return Err(ServiceError::InvalidRequest("game id required".into()));
        }

        let key = CacheKey::GameFeed { game_pk };
        let doc = self
            .cache
            .fetch(&key, &FixedTtl(LIVE_TTL), || {
                self.api.fetch_game_feed(game_pk)
            })
            .await?;

        let raw: FeedResponse = decode(&doc.body, "game feed");
        Ok(detail::normalize_game_detail(&raw))
    }

    /// Seeded postseason bracket for a season. `current_season` is supplied
    /// by the caller: it bounds validation and decides the freshness tier,
    /// and keeping it explicit keeps the view clock-free.
    pub async fn postseason(
        &self,
        season: i32,
        sport_id: u32,
        current_season: i32,
    ) -> ServiceResult<Bracket> {
        if season < MIN_BRACKET_SEASON || season > current_season + 1 {
            return Err(ServiceError::InvalidRequest(format!(
                "invalid season {season} ({MIN_BRACKET_SEASON}+ only)"
            )));
        }
        let sport_id = coerce_sport_id(sport_id);
        let ttl = if season == current_season {
            POSTSEASON_LIVE_TTL
        } else {
            POSTSEASON_TTL
        };

        let series_key = CacheKey::PostseasonSeries { sport_id, season };
        let series: PostseasonResponse = match self
            .cache
            .fetch(&series_key, &FixedTtl(ttl), || {
                self.api.fetch_postseason_series(season, sport_id)
            })
            .await
        {
            Ok(doc) => decode(&doc.body, "postseason series"),
            Err(e) => {
                // Postseason data may legitimately not exist yet; an empty
                // bracket is the answer, not an error.
                debug!("no postseason series for {season}: {e}");
                PostseasonResponse::default()
            }
        };

        let standings_key = CacheKey::SeasonStandings { season };
        let standings: Option<StandingsResponse> = match self
            .cache
            .fetch(&standings_key, &FixedTtl(ttl), || {
                self.api.fetch_standings(season)
            })
            .await
        {
            Ok(doc) => Some(decode(&doc.body, "standings")),
            Err(e) => {
                warn!("standings unavailable for {season}, bracket renders unseeded: {e}");
                None
            }
        };

        Ok(bracket::build_bracket(
            &series,
            standings.as_ref(),
            season,
            self.teams.identities(),
            self.teams.leagues(),
        ))
    }

    pub async fn wild_card_standings(&self, season: i32) -> ServiceResult<Vec<WildCardLeague>> {
        let key = CacheKey::WildCardStandings { season };
        let doc = self
            .cache
            .fetch(&key, &FixedTtl(SCHEDULE_TTL), || {
                self.api.fetch_wild_card_standings(season)
            })
            .await?;

        let raw: StandingsResponse = decode(&doc.body, "wild card standings");
        Ok(standings::normalize_wild_card(&raw))
    }

    /// Division tables for a MiLB level; the MLB level's standings come from
    /// the reference store, not this view.
    pub async fn division_standings(
        &self,
        sport_id: u32,
        season: i32,
    ) -> ServiceResult<BTreeMap<String, Vec<DivisionRow>>> {
        if !VALID_SPORT_IDS.contains(&sport_id) || sport_id == 1 {
            return Err(ServiceError::InvalidRequest(format!(
                "invalid sport_id {sport_id}"
            )));
        }

        let key = CacheKey::DivisionStandings { sport_id, season };
        let doc = self
            .cache
            .fetch(&key, &FixedTtl(SCHEDULE_TTL), || {
                self.api.fetch_division_standings(sport_id, season)
            })
            .await?;

        let raw: StandingsResponse = decode(&doc.body, "division standings");
        Ok(standings::normalize_divisions(&raw))
    }

    pub async fn team_profile(&self, team_id: u32) -> ServiceResult<TeamProfile> {
        validate_team_id(team_id)?;

        let key = CacheKey::TeamProfile { team_id };
        let doc = self
            .cache
            .fetch(&key, &FixedTtl(PROFILE_TTL), || {
                self.api.fetch_team(team_id)
            })
            .await?;

        let raw: TeamsResponse = decode(&doc.body, "team");
        if raw.teams.as_deref().unwrap_or_default().is_empty() {
            return Err(ServiceError::NotFound(format!("team {team_id}")));
        }
        Ok(teams::normalize_team_profile(&raw, team_id))
    }

    pub async fn team_roster(&self, team_id: u32) -> ServiceResult<Vec<RosterPlayer>> {
        validate_team_id(team_id)?;

        let key = CacheKey::TeamRoster { team_id };
        let doc = self
            .cache
            .fetch(&key, &FixedTtl(PROFILE_TTL), || {
                self.api.fetch_roster(team_id)
            })
            .await?;

        let raw: RosterResponse = decode(&doc.body, "roster");
        Ok(teams::normalize_roster(&raw))
    }
}

/// Decode a cached document. The wire structs default every field, so a
/// shape mismatch degrades to an empty view instead of failing the request.
fn decode<T: DeserializeOwned + Default>(body: &str, what: &str) -> T {
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("failed to decode cached {what} document: {e}");
            T::default()
        }
    }
}

fn coerce_sport_id(sport_id: u32) -> u32 {
    if VALID_SPORT_IDS.contains(&sport_id) {
        sport_id
    } else {
        1
    }
}

fn validate_team_id(team_id: u32) -> ServiceResult<()> {
    if (100..=999).contains(&team_id) {
        Ok(())
    } else {
        Err(ServiceError::InvalidRequest(format!(
            "invalid team id {team_id}"
        )))
    }
}
