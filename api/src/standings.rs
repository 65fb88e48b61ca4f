//! Standings normalizers: wild-card races and division tables.

use crate::wire::StandingsResponse;
use crate::{DivisionRow, WildCardLeague, WildCardRow};
use std::collections::BTreeMap;

/// Per-league wild-card table in upstream record order.
pub fn normalize_wild_card(raw: &StandingsResponse) -> Vec<WildCardLeague> {
    raw.records
        .iter()
        .flatten()
        .map(|record| WildCardLeague {
            league: record
                .league
                .as_ref()
                .and_then(|l| l.name.clone())
                .unwrap_or_else(|| "Unknown".to_owned()),
            teams: record
                .team_records
                .iter()
                .flatten()
                .map(|tr| {
                    let team = tr.team.clone().unwrap_or_default();
                    WildCardRow {
                        id: team.id.unwrap_or(0),
                        name: team.name.unwrap_or_default(),
                        wins: tr.wins.unwrap_or(0),
                        losses: tr.losses.unwrap_or(0),
                        pct: tr
                            .league_record
                            .as_ref()
                            .and_then(|r| r.pct.clone())
                            .unwrap_or_else(|| ".000".to_owned()),
                        games_back: tr
                            .wild_card_games_back
                            .clone()
                            .unwrap_or_else(|| "-".to_owned()),
                        rank: tr.wild_card_rank_or_zero(),
                        streak: tr
                            .streak
                            .as_ref()
                            .and_then(|s| s.streak_code.clone())
                            .unwrap_or_else(|| "-".to_owned()),
                        eliminated: tr.wild_card_elimination_number.as_deref() == Some("E"),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Division tables keyed by division name, each sorted by division rank.
pub fn normalize_divisions(raw: &StandingsResponse) -> BTreeMap<String, Vec<DivisionRow>> {
    let mut divisions: BTreeMap<String, Vec<DivisionRow>> = BTreeMap::new();

    for record in raw.records.iter().flatten() {
        let division_name = record
            .division
            .as_ref()
            .and_then(|d| d.name.clone())
            .unwrap_or_else(|| "Unknown".to_owned());
        for tr in record.team_records.iter().flatten() {
            let team = tr.team.clone().unwrap_or_default();
            divisions
                .entry(division_name.clone())
                .or_default()
                .push(DivisionRow {
                    id: team.id.unwrap_or(0),
                    name: team.name.unwrap_or_default(),
                    abbreviation: team.abbreviation.unwrap_or_default(),
                    wins: tr.wins.unwrap_or(0),
                    losses: tr.losses.unwrap_or(0),
                    pct: tr
                        .league_record
                        .as_ref()
                        .and_then(|r| r.pct.clone())
                        .unwrap_or_else(|| ".000".to_owned()),
                    games_back: tr.games_back.clone().unwrap_or_else(|| "-".to_owned()),
                    streak: tr
                        .streak
                        .as_ref()
                        .and_then(|s| s.streak_code.clone())
                        .unwrap_or_else(|| "-".to_owned()),
                    run_differential: tr.run_differential.unwrap_or(0),
                    division_rank: tr.division_rank_or_last(),
                });
        }
    }

    for rows in divisions.values_mut() {
        rows.sort_by_key(|r| r.division_rank);
    }

    divisions
}
