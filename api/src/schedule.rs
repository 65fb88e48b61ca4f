//! Schedule/game normalizer: raw schedule documents → day-bucketed views.
//!
//! Pure functions over decoded wire structs. The center date is an explicit
//! input so the bucket labels never depend on the system clock.

use crate::wire::{BroadcastWire, GameTeamSideWire, GameWire, PersonWire, ScheduleResponse};
use crate::{
    DaySlot, Decisions, GameState, GameSummary, InningLine, PitcherCredit, ProbablePitchers,
    ScheduleDay, TeamMap, TeamSide, game_type_label,
};
use chrono::{DateTime, NaiveDate};
use chrono_tz::America::Chicago;

/// Fixed display zone suffix for formatted start times.
const ZONE_SUFFIX: &str = "CT";

/// Bucket a raw schedule window into exactly three days around `center`.
/// Games dated outside the window are dropped; upstream ordering is preserved
/// within each bucket.
pub fn normalize_schedule(
    raw: &ScheduleResponse,
    teams: &TeamMap,
    center: NaiveDate,
) -> Vec<ScheduleDay> {
    let mut days: Vec<ScheduleDay> = [
        (center.pred_opt().unwrap_or(center), DaySlot::Yesterday),
        (center, DaySlot::Today),
        (center.succ_opt().unwrap_or(center), DaySlot::Tomorrow),
    ]
    .into_iter()
    .map(|(date, slot)| ScheduleDay {
        date,
        label: slot.label(),
        games: Vec::new(),
    })
    .collect();

    for date_entry in raw.dates.iter().flatten() {
        let Some(date) = date_entry
            .date
            .as_deref()
            .and_then(|d| d.parse::<NaiveDate>().ok())
        else {
            continue;
        };
        let Some(day) = days.iter_mut().find(|d| d.date == date) else {
            continue;
        };
        for game in date_entry.games.iter().flatten() {
            day.games.push(normalize_game(game, teams));
        }
    }

    days
}

/// Drop games not involving `team_id` from every bucket.
pub fn retain_team(days: &mut [ScheduleDay], team_id: u32) {
    for day in days {
        day.games
            .retain(|g| g.away.id == team_id || g.home.id == team_id);
    }
}

pub fn normalize_game(g: &GameWire, teams: &TeamMap) -> GameSummary {
    let status = g.status.clone().unwrap_or_default();
    let abstract_state = status.abstract_game_state.as_deref().unwrap_or("Scheduled");
    let state = GameState::from_abstract(abstract_state);
    let game_type = g.game_type.clone().unwrap_or_else(|| "R".to_owned());

    let linescore = g.linescore.clone().unwrap_or_default();
    let offense = linescore.offense.clone().unwrap_or_default();
    let inning_state = linescore.inning_state.clone();

    let mut away = team_side(g.teams.as_ref().and_then(|t| t.away.as_ref()), teams);
    let mut home = team_side(g.teams.as_ref().and_then(|t| t.home.as_ref()), teams);

    // Winner flags only when the game is over and both scores are known.
    if state.is_final()
        && let (Some(a), Some(h)) = (away.score, home.score)
    {
        away.is_winner = a > h;
        home.is_winner = h > a;
    }

    let decisions = if state.is_final() {
        g.decisions.as_ref().map(|d| Decisions {
            winner: d.winner.as_ref().map(pitcher_credit),
            loser: d.loser.as_ref().map(pitcher_credit),
            save: d.save.as_ref().map(pitcher_credit),
        })
    } else {
        None
    };

    let probable_pitchers = if state == GameState::Scheduled {
        let away_prob = g
            .teams
            .as_ref()
            .and_then(|t| t.away.as_ref())
            .and_then(|s| s.probable_pitcher.as_ref());
        let home_prob = g
            .teams
            .as_ref()
            .and_then(|t| t.home.as_ref())
            .and_then(|s| s.probable_pitcher.as_ref());
        if away_prob.is_some() || home_prob.is_some() {
            Some(ProbablePitchers {
                away: away_prob.map(pitcher_credit),
                home: home_prob.map(pitcher_credit),
            })
        } else {
            None
        }
    } else {
        None
    };

    GameSummary {
        game_pk: g.game_pk,
        game_type_label: game_type_label(&game_type),
        game_type,
        start_time: g
            .game_date
            .as_deref()
            .map(format_start_time)
            .unwrap_or_default(),
        status: status
            .detailed_state
            .unwrap_or_else(|| abstract_state.to_owned()),
        status_code: status.status_code.unwrap_or_default(),
        state,
        current_inning: linescore.current_inning,
        inning_ordinal: linescore.current_inning_ordinal,
        outs: linescore.outs,
        on_first: offense.first.is_some(),
        on_second: offense.second.is_some(),
        on_third: offense.third.is_some(),
        is_top_inning: inning_state.as_deref() == Some("Top"),
        inning_state,
        away,
        home,
        broadcasts: tv_broadcasts(g.broadcasts.as_deref().unwrap_or_default()),
        venue: g
            .venue
            .as_ref()
            .and_then(|v| v.name.clone())
            .unwrap_or_default(),
        innings: linescore
            .innings
            .iter()
            .flatten()
            .map(|inn| InningLine {
                away: inn.away.as_ref().and_then(|h| h.runs),
                home: inn.home.as_ref().and_then(|h| h.runs),
            })
            .collect(),
        decisions,
        probable_pitchers,
    }
}

/// UTC instant → "7:05 PM CT". Malformed or missing timestamps format as an
/// empty string rather than failing the transform.
fn format_start_time(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => format!("{} {ZONE_SUFFIX}", dt.with_timezone(&Chicago).format("%-I:%M %p")),
        Err(_) => String::new(),
    }
}

fn team_side(side: Option<&GameTeamSideWire>, teams: &TeamMap) -> TeamSide {
    let side = side.cloned().unwrap_or_default();
    let wire_team = side.team.unwrap_or_default();
    let id = wire_team.id.unwrap_or(0);
    let known = teams.get(&id);

    let record = side
        .league_record
        .and_then(|r| r.wins.zip(r.losses))
        .map(|(w, l)| format!("{w}-{l}"))
        .unwrap_or_default();

    TeamSide {
        id,
        name: known
            .map(|t| t.name.clone())
            .or(wire_team.name)
            .unwrap_or_else(|| "TBD".to_owned()),
        abbreviation: known
            .map(|t| t.abbreviation.clone())
            .or(wire_team.abbreviation)
            .unwrap_or_default(),
        score: side.score,
        record,
        is_winner: false,
    }
}

fn pitcher_credit(p: &PersonWire) -> PitcherCredit {
    PitcherCredit {
        name: p.full_name.clone().unwrap_or_default(),
        hand: p.pitch_hand.as_ref().and_then(|h| h.code.clone()),
    }
}

/// TV broadcasts only, call sign preferred, duplicates dropped in order.
fn tv_broadcasts(broadcasts: &[BroadcastWire]) -> Vec<String> {
    let mut channels: Vec<String> = Vec::new();
    for bc in broadcasts {
        if bc.kind.as_deref() != Some("TV") {
            continue;
        }
        let Some(name) = bc.call_sign.clone().or_else(|| bc.name.clone()) else {
            continue;
        };
        if !name.is_empty() && !channels.contains(&name) {
            channels.push(name);
        }
    }
    channels
}
