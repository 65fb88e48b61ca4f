pub mod bracket;
pub mod client;
pub mod detail;
pub mod schedule;
pub mod standings;
pub mod teams;
pub mod wire;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the statsapi wire format
// ---------------------------------------------------------------------------

/// Coarse game state derived from statsapi's `abstractGameState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Scheduled,
    Live,
    Final,
}

impl GameState {
    pub fn from_abstract(s: &str) -> Self {
        match s {
            "Final" => GameState::Final,
            "Live" => GameState::Live,
            _ => GameState::Scheduled,
        }
    }

    /// Pre-game abstract states never count toward series progress.
    pub fn is_pre_game(abstract_state: &str) -> bool {
        matches!(abstract_state, "Preview" | "Scheduled")
    }

    pub fn is_final(self) -> bool {
        self == GameState::Final
    }

    pub fn is_live(self) -> bool {
        self == GameState::Live
    }
}

/// Human label for a statsapi game-type code.
pub fn game_type_label(code: &str) -> &'static str {
    match code {
        "S" => "Spring Training",
        "E" => "Exhibition",
        "R" => "Regular Season",
        "F" => "Wild Card",
        "D" => "Division Series",
        "L" => "League Championship",
        "W" => "World Series",
        "A" => "All-Star Game",
        "C" => "Championship",
        _ => "Game",
    }
}

/// Local reference snapshot: team id → preferred display identity.
/// Upstream-supplied names are the fallback when a team is absent here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamIdentity {
    pub name: String,
    pub abbreviation: String,
}

pub type TeamMap = HashMap<u32, TeamIdentity>;

// ---------------------------------------------------------------------------
// Schedule view
// ---------------------------------------------------------------------------

/// Relative position of a schedule bucket around the caller-supplied center
/// date. Supplied explicitly so normalization stays clock-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySlot {
    Yesterday,
    Today,
    Tomorrow,
}

impl DaySlot {
    pub fn label(&self) -> &'static str {
        match self {
            DaySlot::Yesterday => "Yesterday",
            DaySlot::Today => "Today",
            DaySlot::Tomorrow => "Tomorrow",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub label: &'static str,
    pub games: Vec<GameSummary>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GameSummary {
    pub game_pk: Option<u64>,
    pub game_type: String,
    pub game_type_label: &'static str,
    /// "7:05 PM CT", empty when the upstream timestamp is missing/malformed.
    pub start_time: String,
    pub status: String,
    pub status_code: String,
    pub state: GameState,
    pub current_inning: Option<u32>,
    pub inning_state: Option<String>,
    pub inning_ordinal: Option<String>,
    pub outs: Option<u32>,
    pub on_first: bool,
    pub on_second: bool,
    pub on_third: bool,
    pub is_top_inning: bool,
    pub away: TeamSide,
    pub home: TeamSide,
    pub broadcasts: Vec<String>,
    pub venue: String,
    pub innings: Vec<InningLine>,
    pub decisions: Option<Decisions>,
    pub probable_pitchers: Option<ProbablePitchers>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamSide {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub score: Option<u32>,
    /// "W-L" string, empty when either count is missing.
    pub record: String,
    pub is_winner: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InningLine {
    pub away: Option<u32>,
    pub home: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Decisions {
    pub winner: Option<PitcherCredit>,
    pub loser: Option<PitcherCredit>,
    pub save: Option<PitcherCredit>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PitcherCredit {
    pub name: String,
    pub hand: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbablePitchers {
    pub away: Option<PitcherCredit>,
    pub home: Option<PitcherCredit>,
}

// ---------------------------------------------------------------------------
// Game detail view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct GameDetail {
    pub innings: Vec<InningScore>,
    pub away_total: LineTotals,
    pub home_total: LineTotals,
    pub current_inning: Option<u32>,
    pub inning_state: Option<String>,
    pub outs: Option<u32>,
    pub status: String,
    pub state: GameState,
    pub away_team: String,
    pub home_team: String,
    pub away_abbr: String,
    pub home_abbr: String,
    pub away_id: u32,
    pub home_id: u32,
    pub away_pitchers: Vec<PitcherLine>,
    pub home_pitchers: Vec<PitcherLine>,
    pub away_batters: Vec<BatterLine>,
    pub home_batters: Vec<BatterLine>,
    pub current_matchup: Option<Matchup>,
    pub decisions: Option<Decisions>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InningScore {
    pub num: u32,
    pub away: Option<u32>,
    pub home: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LineTotals {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PitcherLine {
    pub id: u64,
    pub name: String,
    pub hand: Option<String>,
    pub innings_pitched: String,
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strike_outs: u32,
    pub pitch_count: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatterLine {
    pub id: u64,
    pub name: String,
    pub position: String,
    pub bat_side: Option<String>,
    pub batting_order: u32,
    /// batting_order / 100: the lineup slot this player occupies.
    pub lineup_spot: u32,
    /// batting_order % 100 != 0: entered the game as a substitute.
    pub is_substitute: bool,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strike_outs: u32,
    pub stolen_bases: u32,
    pub avg: String,
    pub season_home_runs: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Matchup {
    pub batter: MatchupBatter,
    pub pitcher: MatchupPitcher,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchupBatter {
    pub id: Option<u64>,
    pub name: String,
    pub position: String,
    pub bat_side: Option<String>,
    pub stats: Option<MatchupBatting>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchupPitcher {
    pub id: Option<u64>,
    pub name: String,
    pub pitch_hand: Option<String>,
    pub stats: Option<MatchupPitching>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchupBatting {
    pub at_bats: u32,
    pub hits: u32,
    pub runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strike_outs: u32,
    pub avg: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchupPitching {
    pub innings_pitched: String,
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strike_outs: u32,
    pub pitch_count: u32,
}

// ---------------------------------------------------------------------------
// Postseason bracket
// ---------------------------------------------------------------------------

pub const AMERICAN_LEAGUE_ID: u32 = 103;

/// The two top-level leagues. Standings league id 103 is American; everything
/// else in a standings snapshot is National.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum League {
    American,
    National,
}

impl League {
    pub fn from_league_id(id: u32) -> Self {
        if id == AMERICAN_LEAGUE_ID {
            League::American
        } else {
            League::National
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }
}

/// A value per league, serialized under the "AL"/"NL" keys the views expose.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaguePair<T> {
    #[serde(rename = "AL")]
    pub al: T,
    #[serde(rename = "NL")]
    pub nl: T,
}

impl<T> LeaguePair<T> {
    pub fn get(&self, league: League) -> &T {
        match league {
            League::American => &self.al,
            League::National => &self.nl,
        }
    }

    pub fn get_mut(&mut self, league: League) -> &mut T {
        match league {
            League::American => &mut self.al,
            League::National => &mut self.nl,
        }
    }
}

/// Playoff seeds per league: 1..=3 division winners, 4..=6 wild cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedMap(pub LeaguePair<HashMap<u32, u8>>);

impl SeedMap {
    pub fn seed(&self, league: League, team_id: u32) -> Option<u8> {
        self.0.get(league).get(&team_id).copied()
    }

    /// Seed lookup across both leagues, preferring the given league.
    pub fn seed_any(&self, league: League, team_id: u32) -> Option<u8> {
        self.seed(league, team_id)
            .or_else(|| self.seed(League::American, team_id))
            .or_else(|| self.seed(League::National, team_id))
    }

    pub fn holds(&self, league: League, team_id: u32) -> bool {
        self.0.get(league).contains_key(&team_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    #[default]
    Scheduled,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BracketTeam {
    pub id: u32,
    pub name: String,         // "TBD" when unresolved
    pub abbreviation: String, // "???" when unresolved
    pub seed: Option<u8>,
    pub is_wild_card: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeriesGame {
    pub game_pk: Option<u64>,
    pub game_number: u32,
    pub away_id: u32,
    pub home_id: u32,
    pub away_score: Option<u32>,
    pub home_score: Option<u32>,
    pub state: GameState,
}

/// One best-of-N elimination series. Top/bottom slots are assigned by seed
/// (lower seed number on top).
#[derive(Debug, Clone, Default, Serialize)]
pub struct BracketSeries {
    pub description: String,
    pub games_in_series: u32,
    pub status: SeriesStatus,
    pub top_team: Option<BracketTeam>,
    pub bottom_team: Option<BracketTeam>,
    pub top_wins: u32,
    pub bottom_wins: u32,
    pub winner_id: Option<u32>,
    pub winner: Option<BracketTeam>,
    pub games: Vec<SeriesGame>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayoffTeam {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub division_rank: u32,
    pub division: String,
    pub clinched: bool,
    pub clinch_type: String,
    pub eliminated: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BracketRounds {
    pub wild_card: LeaguePair<Vec<BracketSeries>>,
    pub div_series: LeaguePair<Vec<BracketSeries>>,
    pub lcs: LeaguePair<Option<BracketSeries>>,
    pub world_series: Option<BracketSeries>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Bracket {
    pub season: i32,
    pub seeds: SeedMap,
    pub playoff_teams: LeaguePair<Vec<PlayoffTeam>>,
    pub rounds: BracketRounds,
    pub has_started: bool,
    pub is_complete: bool,
}

// ---------------------------------------------------------------------------
// Standings views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct WildCardLeague {
    pub league: String,
    pub teams: Vec<WildCardRow>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WildCardRow {
    pub id: u32,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
    pub games_back: String,
    pub rank: u32,
    pub streak: String,
    pub eliminated: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DivisionRow {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
    pub games_back: String,
    pub streak: String,
    pub run_differential: i32,
    pub division_rank: u32,
}

// ---------------------------------------------------------------------------
// Team views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamProfile {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub abbreviation: String,
    pub location: String,
    pub first_year_of_play: String,
    pub league: String,
    pub division: String,
    pub venue: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RosterPlayer {
    pub id: u64,
    pub name: String,
    pub number: String,
    pub position: String,
    pub position_type: String,
    pub bats: Option<String>,
    pub throws: Option<String>,
    pub age: u32,
    /// Season stat line passthrough; shape varies by position group.
    pub stats: serde_json::Value,
}
