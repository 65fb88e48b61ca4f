//! Game-feed normalizer: the live feed document → a box-score detail view.
//!
//! Every nested access has a default; a sparse pre-game feed produces an
//! empty-but-valid detail rather than an error.

use crate::wire::{BoxSideWire, BoxscoreWire, FeedResponse, LinescoreWire, PersonWire};
use crate::{
    BatterLine, Decisions, GameDetail, GameState, InningScore, LineTotals, Matchup, MatchupBatter,
    MatchupBatting, MatchupPitcher, MatchupPitching, PitcherCredit, PitcherLine,
};

pub fn normalize_game_detail(raw: &FeedResponse) -> GameDetail {
    let game_data = raw.game_data.clone().unwrap_or_default();
    let live_data = raw.live_data.clone().unwrap_or_default();
    let linescore = live_data.linescore.clone().unwrap_or_default();
    let boxscore = live_data.boxscore.clone().unwrap_or_default();

    let status = game_data.status.unwrap_or_default();
    let state = GameState::from_abstract(status.abstract_game_state.as_deref().unwrap_or(""));

    let innings = linescore
        .innings
        .iter()
        .flatten()
        .map(|inn| InningScore {
            num: inn.num.unwrap_or(0),
            away: inn.away.as_ref().and_then(|h| h.runs),
            home: inn.home.as_ref().and_then(|h| h.runs),
        })
        .collect();

    let away_team = game_data
        .teams
        .as_ref()
        .and_then(|t| t.away.clone())
        .unwrap_or_default();
    let home_team = game_data
        .teams
        .as_ref()
        .and_then(|t| t.home.clone())
        .unwrap_or_default();

    let current_matchup = live_data
        .plays
        .as_ref()
        .and_then(|p| p.current_play.as_ref())
        .and_then(|p| p.matchup.as_ref())
        .map(|m| build_matchup(m.batter.as_ref(), m.pitcher.as_ref(), &boxscore));

    let decisions = live_data.decisions.as_ref().map(|d| Decisions {
        winner: d.winner.as_ref().map(|p| decision_credit(p, &boxscore)),
        loser: d.loser.as_ref().map(|p| decision_credit(p, &boxscore)),
        save: d.save.as_ref().map(|p| decision_credit(p, &boxscore)),
    });

    GameDetail {
        innings,
        away_total: side_totals(&linescore, |t| t.away.as_ref()),
        home_total: side_totals(&linescore, |t| t.home.as_ref()),
        current_inning: linescore.current_inning,
        inning_state: linescore.inning_state.clone(),
        outs: linescore.outs,
        status: status.detailed_state.unwrap_or_default(),
        state,
        away_id: away_team.id.unwrap_or(0),
        home_id: home_team.id.unwrap_or(0),
        away_team: away_team.name.unwrap_or_default(),
        home_team: home_team.name.unwrap_or_default(),
        away_abbr: away_team.abbreviation.unwrap_or_default(),
        home_abbr: home_team.abbreviation.unwrap_or_default(),
        away_pitchers: extract_pitchers(boxscore.teams.as_ref().and_then(|t| t.away.as_ref())),
        home_pitchers: extract_pitchers(boxscore.teams.as_ref().and_then(|t| t.home.as_ref())),
        away_batters: extract_batters(boxscore.teams.as_ref().and_then(|t| t.away.as_ref())),
        home_batters: extract_batters(boxscore.teams.as_ref().and_then(|t| t.home.as_ref())),
        current_matchup,
        decisions,
    }
}

fn side_totals<'a, F>(linescore: &'a LinescoreWire, pick: F) -> LineTotals
where
    F: Fn(&'a crate::wire::LinescoreTeamsWire) -> Option<&'a crate::wire::SideTotalsWire>,
{
    linescore
        .teams
        .as_ref()
        .and_then(pick)
        .map(|t| LineTotals {
            runs: t.runs.unwrap_or(0),
            hits: t.hits.unwrap_or(0),
            errors: t.errors.unwrap_or(0),
        })
        .unwrap_or_default()
}

/// Pitcher appearances in the order the box score lists them.
fn extract_pitchers(side: Option<&BoxSideWire>) -> Vec<PitcherLine> {
    let Some(side) = side else {
        return Vec::new();
    };
    side.pitchers
        .iter()
        .flatten()
        .filter_map(|&pid| {
            let player = side.player(pid)?;
            let person = player.person.clone().unwrap_or_default();
            let stats = player
                .stats
                .as_ref()
                .and_then(|s| s.pitching.clone())
                .unwrap_or_default();
            Some(PitcherLine {
                id: pid,
                name: person.full_name.unwrap_or_default(),
                hand: person.pitch_hand.and_then(|h| h.code),
                innings_pitched: stats.innings_pitched.unwrap_or_else(|| "-".to_owned()),
                hits: stats.hits.unwrap_or(0),
                runs: stats.runs.unwrap_or(0),
                earned_runs: stats.earned_runs.unwrap_or(0),
                walks: stats.base_on_balls.unwrap_or(0),
                strike_outs: stats.strike_outs.unwrap_or(0),
                pitch_count: stats.number_of_pitches.unwrap_or(0),
            })
        })
        .collect()
}

/// Players holding a batting-order slot, sorted ascending so starters come
/// first and substitutes slot in after the spot they took over.
fn extract_batters(side: Option<&BoxSideWire>) -> Vec<BatterLine> {
    let Some(side) = side else {
        return Vec::new();
    };
    let mut batters: Vec<BatterLine> = side
        .players
        .iter()
        .flat_map(|players| players.values())
        .filter_map(|player| {
            let order: u32 = player.batting_order.as_deref()?.parse().ok()?;
            let person = player.person.clone().unwrap_or_default();
            let stats = player
                .stats
                .as_ref()
                .and_then(|s| s.batting.clone())
                .unwrap_or_default();
            let season = player
                .season_stats
                .as_ref()
                .and_then(|s| s.batting.clone())
                .unwrap_or_default();
            Some(BatterLine {
                id: person.id.unwrap_or(0),
                name: person.full_name.unwrap_or_default(),
                position: player
                    .position
                    .as_ref()
                    .and_then(|p| p.abbreviation.clone())
                    .unwrap_or_default(),
                bat_side: person.bat_side.and_then(|b| b.code),
                batting_order: order,
                lineup_spot: order / 100,
                is_substitute: order % 100 != 0,
                at_bats: stats.at_bats.unwrap_or(0),
                runs: stats.runs.unwrap_or(0),
                hits: stats.hits.unwrap_or(0),
                doubles: stats.doubles.unwrap_or(0),
                triples: stats.triples.unwrap_or(0),
                home_runs: stats.home_runs.unwrap_or(0),
                rbi: stats.rbi.unwrap_or(0),
                walks: stats.base_on_balls.unwrap_or(0),
                strike_outs: stats.strike_outs.unwrap_or(0),
                stolen_bases: stats.stolen_bases.unwrap_or(0),
                avg: stats.avg.unwrap_or_else(|| "-".to_owned()),
                season_home_runs: season.home_runs.unwrap_or(0),
            })
        })
        .collect();
    batters.sort_by_key(|b| b.batting_order);
    batters
}

/// Scan both rosters for a player id; the box score is the only place the
/// feed carries position and handedness for the current matchup.
fn find_player<'a>(
    boxscore: &'a BoxscoreWire,
    id: u64,
) -> Option<&'a crate::wire::BoxPlayerWire> {
    let teams = boxscore.teams.as_ref()?;
    [teams.away.as_ref(), teams.home.as_ref()]
        .into_iter()
        .flatten()
        .find_map(|side| side.player(id))
}

fn build_matchup(
    batter: Option<&PersonWire>,
    pitcher: Option<&PersonWire>,
    boxscore: &BoxscoreWire,
) -> Matchup {
    let batter_id = batter.and_then(|b| b.id);
    let batter_box = batter_id.and_then(|id| find_player(boxscore, id));
    let pitcher_id = pitcher.and_then(|p| p.id);
    let pitcher_box = pitcher_id.and_then(|id| find_player(boxscore, id));

    Matchup {
        batter: MatchupBatter {
            id: batter_id,
            name: batter
                .and_then(|b| b.full_name.clone())
                .unwrap_or_default(),
            position: batter_box
                .and_then(|p| p.position.as_ref())
                .and_then(|p| p.abbreviation.clone())
                .unwrap_or_default(),
            bat_side: batter_box
                .and_then(|p| p.person.as_ref())
                .and_then(|p| p.bat_side.as_ref())
                .and_then(|b| b.code.clone()),
            stats: batter_box
                .and_then(|p| p.stats.as_ref())
                .and_then(|s| s.batting.as_ref())
                .map(|b| MatchupBatting {
                    at_bats: b.at_bats.unwrap_or(0),
                    hits: b.hits.unwrap_or(0),
                    runs: b.runs.unwrap_or(0),
                    rbi: b.rbi.unwrap_or(0),
                    walks: b.base_on_balls.unwrap_or(0),
                    strike_outs: b.strike_outs.unwrap_or(0),
                    avg: b.avg.clone().unwrap_or_else(|| "-".to_owned()),
                }),
        },
        pitcher: MatchupPitcher {
            id: pitcher_id,
            name: pitcher
                .and_then(|p| p.full_name.clone())
                .unwrap_or_default(),
            pitch_hand: pitcher_box
                .and_then(|p| p.person.as_ref())
                .and_then(|p| p.pitch_hand.as_ref())
                .and_then(|h| h.code.clone()),
            stats: pitcher_box
                .and_then(|p| p.stats.as_ref())
                .and_then(|s| s.pitching.as_ref())
                .map(|p| MatchupPitching {
                    innings_pitched: p.innings_pitched.clone().unwrap_or_else(|| "-".to_owned()),
                    hits: p.hits.unwrap_or(0),
                    runs: p.runs.unwrap_or(0),
                    earned_runs: p.earned_runs.unwrap_or(0),
                    walks: p.base_on_balls.unwrap_or(0),
                    strike_outs: p.strike_outs.unwrap_or(0),
                    pitch_count: p.number_of_pitches.unwrap_or(0),
                }),
        },
    }
}

/// Decision credits carry handedness only via the box-score player entry.
fn decision_credit(person: &PersonWire, boxscore: &BoxscoreWire) -> PitcherCredit {
    let hand = person
        .id
        .and_then(|id| find_player(boxscore, id))
        .and_then(|p| p.person.as_ref())
        .and_then(|p| p.pitch_hand.as_ref())
        .and_then(|h| h.code.clone());
    PitcherCredit {
        name: person.full_name.clone().unwrap_or_default(),
        hand,
    }
}
