/// MLB Stats API raw wire types — serde shapes for deserializing statsapi
/// responses. These map to our clean domain types via the transform modules
/// (`schedule`, `detail`, `bracket`, `standings`).
use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Schedule  (/api/v1/schedule)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    pub dates: Option<Vec<ScheduleDate>>,
}

impl ScheduleResponse {
    /// True when any game in the window is in a live abstract state.
    /// Drives the schedule cache policy's short TTL.
    pub fn has_live_games(&self) -> bool {
        self.dates
            .iter()
            .flatten()
            .flat_map(|d| d.games.iter().flatten())
            .any(|g| {
                g.status
                    .as_ref()
                    .and_then(|s| s.abstract_game_state.as_deref())
                    == Some("Live")
            })
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleDate {
    pub date: Option<String>, // "YYYY-MM-DD"
    pub games: Option<Vec<GameWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameWire {
    pub game_pk: Option<u64>,
    pub game_type: Option<String>, // "R", "F", "D", "L", "W", ...
    pub game_date: Option<String>, // ISO 8601, UTC
    pub status: Option<GameStatusWire>,
    pub teams: Option<GameTeamsWire>,
    pub linescore: Option<LinescoreWire>,
    pub venue: Option<NamedWire>,
    pub broadcasts: Option<Vec<BroadcastWire>>,
    pub decisions: Option<DecisionsWire>,
    pub games_in_series: Option<u32>,
    pub series_game_number: Option<u32>,
    pub series_description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusWire {
    pub abstract_game_state: Option<String>, // "Preview" | "Live" | "Final"
    pub detailed_state: Option<String>,
    pub status_code: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameTeamsWire {
    pub away: Option<GameTeamSideWire>,
    pub home: Option<GameTeamSideWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameTeamSideWire {
    pub team: Option<TeamWire>,
    pub score: Option<u32>,
    pub league_record: Option<LeagueRecordWire>,
    pub probable_pitcher: Option<PersonWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRecordWire {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub pct: Option<String>, // statsapi sends percentages as strings
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LinescoreWire {
    pub current_inning: Option<u32>,
    pub current_inning_ordinal: Option<String>,
    pub inning_state: Option<String>, // "Top" | "Middle" | "Bottom" | "End"
    pub outs: Option<u32>,
    pub innings: Option<Vec<InningWire>>,
    pub teams: Option<LinescoreTeamsWire>,
    pub offense: Option<OffenseWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct InningWire {
    pub num: Option<u32>,
    pub away: Option<InningHalfWire>,
    pub home: Option<InningHalfWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct InningHalfWire {
    pub runs: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LinescoreTeamsWire {
    pub away: Option<SideTotalsWire>,
    pub home: Option<SideTotalsWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SideTotalsWire {
    pub runs: Option<u32>,
    pub hits: Option<u32>,
    pub errors: Option<u32>,
}

/// Presence of a runner object means the base is occupied.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct OffenseWire {
    pub first: Option<PersonWire>,
    pub second: Option<PersonWire>,
    pub third: Option<PersonWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastWire {
    #[serde(rename = "type")]
    pub kind: Option<String>, // "TV" | "AM" | "FM"
    pub name: Option<String>,
    pub call_sign: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DecisionsWire {
    pub winner: Option<PersonWire>,
    pub loser: Option<PersonWire>,
    pub save: Option<PersonWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersonWire {
    pub id: Option<u64>,
    pub full_name: Option<String>,
    pub bat_side: Option<CodeWire>,
    pub pitch_hand: Option<CodeWire>,
    pub current_age: Option<u32>,
    pub stats: Option<Vec<StatGroupWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CodeWire {
    pub code: Option<String>, // "L" | "R" | "S"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NamedWire {
    pub id: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamWire {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
    pub location_name: Option<String>,
    pub first_year_of_play: Option<String>,
    pub league: Option<NamedWire>,
    pub division: Option<NamedWire>,
    pub venue: Option<NamedWire>,
    pub sport: Option<NamedWire>,
    pub parent_org_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Live game feed  (/api/v1.1/game/{pk}/feed/live)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub game_data: Option<GameDataWire>,
    pub live_data: Option<LiveDataWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameDataWire {
    pub teams: Option<FeedTeamsWire>,
    pub status: Option<GameStatusWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FeedTeamsWire {
    pub away: Option<TeamWire>,
    pub home: Option<TeamWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LiveDataWire {
    pub linescore: Option<LinescoreWire>,
    pub boxscore: Option<BoxscoreWire>,
    pub plays: Option<PlaysWire>,
    pub decisions: Option<DecisionsWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscoreWire {
    pub teams: Option<BoxTeamsWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxTeamsWire {
    pub away: Option<BoxSideWire>,
    pub home: Option<BoxSideWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxSideWire {
    /// Pitcher ids in appearance order.
    pub pitchers: Option<Vec<u64>>,
    /// Keyed "ID{personId}".
    pub players: Option<HashMap<String, BoxPlayerWire>>,
}

impl BoxSideWire {
    pub fn player(&self, id: u64) -> Option<&BoxPlayerWire> {
        self.players.as_ref()?.get(&format!("ID{id}"))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlayerWire {
    pub person: Option<PersonWire>,
    pub position: Option<PositionWire>,
    /// statsapi sends batting order as a string, e.g. "100" or "401".
    pub batting_order: Option<String>,
    pub stats: Option<PlayerStatsWire>,
    pub season_stats: Option<PlayerStatsWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionWire {
    pub abbreviation: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>, // "Pitcher" | "Infielder" | ...
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerStatsWire {
    pub batting: Option<BattingStatsWire>,
    pub pitching: Option<PitchingStatsWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BattingStatsWire {
    pub at_bats: Option<u32>,
    pub runs: Option<u32>,
    pub hits: Option<u32>,
    pub doubles: Option<u32>,
    pub triples: Option<u32>,
    pub home_runs: Option<u32>,
    pub rbi: Option<u32>,
    pub base_on_balls: Option<u32>,
    pub strike_outs: Option<u32>,
    pub stolen_bases: Option<u32>,
    pub avg: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStatsWire {
    pub innings_pitched: Option<String>, // "6.2"
    pub hits: Option<u32>,
    pub runs: Option<u32>,
    pub earned_runs: Option<u32>,
    pub base_on_balls: Option<u32>,
    pub strike_outs: Option<u32>,
    pub number_of_pitches: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaysWire {
    pub current_play: Option<PlayWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayWire {
    pub matchup: Option<MatchupWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchupWire {
    pub batter: Option<PersonWire>,
    pub pitcher: Option<PersonWire>,
}

// ---------------------------------------------------------------------------
// Standings  (/api/v1/standings)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    pub records: Option<Vec<StandingsRecordWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRecordWire {
    pub league: Option<NamedWire>,
    pub division: Option<NamedWire>,
    pub team_records: Option<Vec<TeamRecordWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecordWire {
    pub team: Option<TeamWire>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    /// statsapi sends ranks as strings.
    pub division_rank: Option<String>,
    pub wild_card_rank: Option<String>,
    pub games_back: Option<String>,
    pub wild_card_games_back: Option<String>,
    pub league_record: Option<LeagueRecordWire>,
    pub streak: Option<StreakWire>,
    pub run_differential: Option<i32>,
    pub clinched: Option<bool>,
    pub clinch_indicator: Option<String>,
    pub elimination_number: Option<String>,
    pub wild_card_elimination_number: Option<String>,
}

impl TeamRecordWire {
    /// Division rank parsed from its wire string; 99 when absent or malformed
    /// so unranked teams sort last.
    pub fn division_rank_or_last(&self) -> u32 {
        self.division_rank
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or(99)
    }

    pub fn wild_card_rank_or_zero(&self) -> u32 {
        self.wild_card_rank
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StreakWire {
    pub streak_code: Option<String>, // "W3", "L1"
}

// ---------------------------------------------------------------------------
// Postseason series  (/api/v1/schedule/postseason/series)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PostseasonResponse {
    pub series: Option<Vec<SeriesWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SeriesWire {
    pub games: Option<Vec<GameWire>>,
}

// ---------------------------------------------------------------------------
// Teams & rosters  (/api/v1/teams, /api/v1/teams/{id}/roster)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub teams: Option<Vec<TeamWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    pub roster: Option<Vec<RosterEntryWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryWire {
    pub person: Option<PersonWire>,
    pub jersey_number: Option<String>,
    pub position: Option<PositionWire>,
}

/// Season stat hydration: stats[].splits[].stat — the first non-empty split
/// is the season line. The stat payload shape varies per position group, so
/// it is passed through untyped.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatGroupWire {
    pub splits: Option<Vec<StatSplitWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatSplitWire {
    pub stat: Option<serde_json::Value>,
}
